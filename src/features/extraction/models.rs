use serde::{Deserialize, Serialize};

/// レシート画像から抽出された構造化データ
///
/// Gemini APIに渡す出力スキーマと1対1で対応する。応答がこの形に
/// 解析できない場合、抽出は失敗として扱われる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptExtraction {
    /// 支払い合計金額
    pub amount: f64,
    /// 通貨（ISOコード）
    pub currency: String,
    /// 取引日（YYYY-MM-DD）
    pub date: String,
    /// 店舗・事業者名
    pub vendor: String,
    /// カテゴリ（閉じた集合への丸め込みは呼び出し側で行う）
    pub category: String,
    /// 購入内容の短い説明
    pub description: String,
}

/// フォームHTMLから推定されたフィールド識別子の組
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormFieldExtraction {
    pub amount: String,
    pub date: String,
    pub vendor: String,
    pub category: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_extraction_deserialization() {
        let json = r#"{
            "amount": 450,
            "currency": "INR",
            "date": "2024-03-01",
            "vendor": "Cafe X",
            "category": "Food & Dining",
            "description": "Lunch at cafe"
        }"#;

        let extraction: ReceiptExtraction = serde_json::from_str(json).unwrap();
        assert_eq!(extraction.amount, 450.0);
        assert_eq!(extraction.currency, "INR");
        assert_eq!(extraction.vendor, "Cafe X");
    }

    #[test]
    fn test_receipt_extraction_missing_field_fails() {
        // スキーマで必須のフィールドが欠けた応答は解析エラーになる
        let json = r#"{"amount": 450, "currency": "INR"}"#;
        assert!(serde_json::from_str::<ReceiptExtraction>(json).is_err());
    }

    #[test]
    fn test_form_field_extraction_deserialization() {
        let json = r#"{
            "amount": "entry.111",
            "date": "entry.222",
            "vendor": "entry.333",
            "category": "entry.444",
            "description": "entry.555"
        }"#;

        let extraction: FormFieldExtraction = serde_json::from_str(json).unwrap();
        assert_eq!(extraction.amount, "entry.111");
        assert_eq!(extraction.description, "entry.555");
    }
}

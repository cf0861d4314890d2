use crate::features::records::models::{Category, ReceiptRecord};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils;
use serde::{Deserialize, Serialize};

/// 編集可能な下書きフィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftField {
    Amount,
    Currency,
    Date,
    Vendor,
    Category,
    Description,
}

/// レビュー画面へ返すセッションの状態
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    /// AI解析の待機中かどうか
    pub analyzing: bool,
    /// 現在の下書き（解析待ちの間はNone）
    pub draft: Option<ReceiptRecord>,
}

/// レビュー/編集セッション
///
/// 確定待ちの下書きを最大1件だけ保持する。フィールド単位の上書きのみを
/// 許し、バリデーションはカテゴリの丸め込みと金額の数値解析だけ。
/// 確定時に下書きを取り出してレコードストアへ渡す。
pub struct ReviewSession {
    draft: Option<ReceiptRecord>,
    /// 解析待ちの下書きID（解析結果の遅延到着を判別するため）
    pending_id: Option<String>,
}

impl Default for ReviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewSession {
    /// 空のセッションを作成
    pub fn new() -> Self {
        Self {
            draft: None,
            pending_id: None,
        }
    }

    /// 解析の開始を記録する
    ///
    /// 既存の下書きは破棄される（新しいキャプチャが常に優先）。
    ///
    /// # 引数
    /// * `draft_id` - 解析中の下書きに割り当てたID
    pub fn begin_analysis(&mut self, draft_id: String) {
        self.draft = None;
        self.pending_id = Some(draft_id);
    }

    /// 解析結果の下書きを受け取る
    ///
    /// # 引数
    /// * `draft` - 構築された下書き
    ///
    /// # 戻り値
    /// 採用された場合はtrue。解析中に別のキャプチャが始まっていた
    /// （IDが一致しない）場合は破棄してfalse
    pub fn complete_analysis(&mut self, draft: ReceiptRecord) -> bool {
        if self.pending_id.as_deref() != Some(draft.id.as_str()) {
            return false;
        }

        self.pending_id = None;
        self.draft = Some(draft);
        true
    }

    /// 解析待ちかどうか
    pub fn is_analyzing(&self) -> bool {
        self.pending_id.is_some()
    }

    /// 現在のセッション状態を取得
    pub fn state(&self) -> ReviewState {
        ReviewState {
            analyzing: self.is_analyzing(),
            draft: self.draft.clone(),
        }
    }

    /// 下書きのフィールドを1つ上書きする
    ///
    /// # 引数
    /// * `field` - 対象フィールド
    /// * `value` - 新しい値（文字列表現）
    ///
    /// # 戻り値
    /// 更新後の下書き、または下書きがない・金額が解析できない場合はエラー
    pub fn set_field(&mut self, field: DraftField, value: &str) -> AppResult<&ReceiptRecord> {
        let draft = self
            .draft
            .as_mut()
            .ok_or_else(|| AppError::not_found("下書き"))?;

        match field {
            DraftField::Amount => draft.amount = utils::parse_amount(value)?,
            DraftField::Currency => draft.currency = value.to_string(),
            DraftField::Date => draft.date = value.to_string(),
            DraftField::Vendor => draft.vendor = value.to_string(),
            // カテゴリは常に閉じた集合へ丸め込む
            DraftField::Category => draft.category = Category::coerce(value),
            DraftField::Description => draft.description = value.to_string(),
        }

        Ok(&*draft)
    }

    /// 確定のために下書きを取り出す
    ///
    /// # 戻り値
    /// 下書きレコード、または下書きがない場合はエラー
    pub fn take_confirmed(&mut self) -> AppResult<ReceiptRecord> {
        self.pending_id = None;
        self.draft
            .take()
            .ok_or_else(|| AppError::not_found("下書き"))
    }

    /// 下書きを破棄する
    pub fn discard(&mut self) {
        self.draft = None;
        self.pending_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::records::models::ReceiptStatus;

    fn sample_draft(id: &str) -> ReceiptRecord {
        ReceiptRecord {
            id: id.to_string(),
            amount: 450.0,
            currency: "INR".to_string(),
            date: "2024-03-01".to_string(),
            vendor: "Cafe X".to_string(),
            category: Category::FoodAndDining,
            description: String::new(),
            image_url: None,
            status: ReceiptStatus::Pending,
        }
    }

    #[test]
    fn test_analysis_lifecycle() {
        let mut session = ReviewSession::new();
        assert!(!session.is_analyzing());
        assert!(session.state().draft.is_none());

        session.begin_analysis("id-1".to_string());
        assert!(session.is_analyzing());

        assert!(session.complete_analysis(sample_draft("id-1")));
        assert!(!session.is_analyzing());
        assert_eq!(session.state().draft.unwrap().id, "id-1");
    }

    #[test]
    fn test_stale_analysis_result_is_dropped() {
        let mut session = ReviewSession::new();
        session.begin_analysis("id-1".to_string());

        // 解析中に次のキャプチャが始まる
        session.begin_analysis("id-2".to_string());

        // 遅れて届いた古い結果は採用されない
        assert!(!session.complete_analysis(sample_draft("id-1")));
        assert!(session.is_analyzing());
        assert!(session.state().draft.is_none());

        // 新しい結果は採用される
        assert!(session.complete_analysis(sample_draft("id-2")));
        assert_eq!(session.state().draft.unwrap().id, "id-2");
    }

    #[test]
    fn test_begin_analysis_discards_existing_draft() {
        let mut session = ReviewSession::new();
        session.begin_analysis("id-1".to_string());
        session.complete_analysis(sample_draft("id-1"));

        session.begin_analysis("id-2".to_string());
        assert!(session.state().draft.is_none());
    }

    #[test]
    fn test_set_field() {
        let mut session = ReviewSession::new();
        session.begin_analysis("id-1".to_string());
        session.complete_analysis(sample_draft("id-1"));

        session.set_field(DraftField::Amount, "120.5").unwrap();
        session.set_field(DraftField::Vendor, "New Vendor").unwrap();
        session.set_field(DraftField::Date, "2024-04-01").unwrap();
        let draft = session
            .set_field(DraftField::Description, "memo")
            .unwrap()
            .clone();

        assert_eq!(draft.amount, 120.5);
        assert_eq!(draft.vendor, "New Vendor");
        assert_eq!(draft.date, "2024-04-01");
        assert_eq!(draft.description, "memo");
        // 編集してもIDと状態は変わらない
        assert_eq!(draft.id, "id-1");
        assert_eq!(draft.status, ReceiptStatus::Pending);
    }

    #[test]
    fn test_set_field_coerces_category() {
        let mut session = ReviewSession::new();
        session.begin_analysis("id-1".to_string());
        session.complete_analysis(sample_draft("id-1"));

        session.set_field(DraftField::Category, "Travel").unwrap();
        assert_eq!(session.state().draft.unwrap().category, Category::Travel);

        session.set_field(DraftField::Category, "Groceries").unwrap();
        assert_eq!(session.state().draft.unwrap().category, Category::Other);
    }

    #[test]
    fn test_set_field_invalid_amount() {
        let mut session = ReviewSession::new();
        session.begin_analysis("id-1".to_string());
        session.complete_analysis(sample_draft("id-1"));

        let result = session.set_field(DraftField::Amount, "abc");
        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));

        // 失敗した編集は下書きに反映されない
        assert_eq!(session.state().draft.unwrap().amount, 450.0);
    }

    #[test]
    fn test_set_field_without_draft() {
        let mut session = ReviewSession::new();
        let result = session.set_field(DraftField::Vendor, "x");
        assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
    }

    #[test]
    fn test_take_confirmed() {
        let mut session = ReviewSession::new();
        session.begin_analysis("id-1".to_string());
        session.complete_analysis(sample_draft("id-1"));

        let record = session.take_confirmed().unwrap();
        assert_eq!(record.id, "id-1");

        // 取り出した後は空になる
        assert!(session.state().draft.is_none());
        assert!(session.take_confirmed().is_err());
    }

    #[test]
    fn test_discard() {
        let mut session = ReviewSession::new();
        session.begin_analysis("id-1".to_string());
        session.complete_analysis(sample_draft("id-1"));

        session.discard();
        assert!(session.state().draft.is_none());
        assert!(!session.is_analyzing());
    }
}

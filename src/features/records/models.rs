use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 経費カテゴリ（固定の9種類）
///
/// レコードが持てるカテゴリはこの閉じた集合のみ。外部から与えられた
/// ラベルは必ず`coerce`を通して集合内に丸め込まれる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    FoodAndDining,
    Shopping,
    Transport,
    BillsAndUtilities,
    Entertainment,
    HealthAndWellness,
    Business,
    Travel,
    Other,
}

impl Category {
    /// 全カテゴリ（表示順）
    pub const ALL: [Category; 9] = [
        Category::FoodAndDining,
        Category::Shopping,
        Category::Transport,
        Category::BillsAndUtilities,
        Category::Entertainment,
        Category::HealthAndWellness,
        Category::Business,
        Category::Travel,
        Category::Other,
    ];

    /// カテゴリの表示ラベルを取得
    ///
    /// # 戻り値
    /// カテゴリラベル文字列
    pub fn label(&self) -> &'static str {
        match self {
            Category::FoodAndDining => "Food & Dining",
            Category::Shopping => "Shopping",
            Category::Transport => "Transport",
            Category::BillsAndUtilities => "Bills & Utilities",
            Category::Entertainment => "Entertainment",
            Category::HealthAndWellness => "Health & Wellness",
            Category::Business => "Business",
            Category::Travel => "Travel",
            Category::Other => "Other",
        }
    }

    /// 任意のラベル文字列をカテゴリ集合内に丸め込む
    ///
    /// # 引数
    /// * `label` - 外部から与えられたラベル（AI応答、保存データ、画面入力）
    ///
    /// # 戻り値
    /// 一致するカテゴリ、集合外の場合はOther
    ///
    /// # 不変条件
    /// 丸め込みは冪等: 集合内のラベルはそのまま返る。外部由来のカテゴリは
    /// すべてこの関数を通すこと（フォールバック規則はここ一箇所のみ）。
    pub fn coerce(label: &str) -> Category {
        Category::ALL
            .into_iter()
            .find(|c| c.label() == label)
            .unwrap_or(Category::Other)
    }
}

/// カテゴリはラベル文字列として直列化する
impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// 復元時も丸め込み規則を通す（保存データに集合外ラベルが紛れても壊れない）
impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Category::coerce(&label))
    }
}

/// レコードの送信状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    /// 未送信（初期状態）
    Pending,
    /// フォーム送信済み（成功後のみ。巻き戻しはしない）
    Submitted,
}

/// レシートレコード（永続化の単位）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    /// 一意識別子（下書き作成時に生成、以後不変）
    pub id: String,
    /// 金額（非負）
    pub amount: f64,
    /// 通貨コード（ISO形式）
    pub currency: String,
    /// 取引日（YYYY-MM-DD）
    pub date: String,
    /// 店舗・支払先名
    pub vendor: String,
    /// カテゴリ
    pub category: Category,
    /// メモ（空文字列可）
    pub description: String,
    /// 元画像のdata URL（下書き段階で保持。永続化後は任意）
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// 送信状態
    pub status: ReceiptStatus,
}

/// カテゴリ別集計
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

/// 支出サマリー（保存せず都度再計算する派生値）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingSummary {
    /// 全レコードの合計金額
    pub total: f64,
    /// カテゴリ別合計（固定集合の全カテゴリを常に含む）
    #[serde(rename = "byCategory")]
    pub by_category: Vec<CategoryTotal>,
    /// レコード件数
    #[serde(rename = "recordCount")]
    pub record_count: usize,
    /// 1件あたりの平均金額
    pub average: f64,
}

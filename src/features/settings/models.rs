use serde::{Deserialize, Serialize};

/// 表示モード（ライト/ダーク）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Light,
    Dark,
}

impl Default for DisplayMode {
    fn default() -> Self {
        DisplayMode::Light
    }
}

impl DisplayMode {
    /// 反対のモードを返す
    pub fn toggled(&self) -> DisplayMode {
        match self {
            DisplayMode::Light => DisplayMode::Dark,
            DisplayMode::Dark => DisplayMode::Light,
        }
    }
}

/// フォームの論理フィールドキー（固定の5種類）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormFieldKey {
    Amount,
    Date,
    Vendor,
    Category,
    Description,
}

impl FormFieldKey {
    /// 全フィールドキー（送信時のペア構築順）
    pub const ALL: [FormFieldKey; 5] = [
        FormFieldKey::Amount,
        FormFieldKey::Date,
        FormFieldKey::Vendor,
        FormFieldKey::Category,
        FormFieldKey::Description,
    ];
}

fn default_amount_field() -> String {
    "entry.1".to_string()
}

fn default_date_field() -> String {
    "entry.2".to_string()
}

fn default_vendor_field() -> String {
    "entry.3".to_string()
}

fn default_category_field() -> String {
    "entry.4".to_string()
}

fn default_description_field() -> String {
    "entry.5".to_string()
}

/// 論理フィールドキーから外部フォームのフィールド識別子へのマッピング
///
/// 5キーは常に揃っている（保存データに欠けがあればデフォルトで補完する）。
/// 識別子の形式は検証しない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormFieldMap {
    #[serde(default = "default_amount_field")]
    pub amount: String,
    #[serde(default = "default_date_field")]
    pub date: String,
    #[serde(default = "default_vendor_field")]
    pub vendor: String,
    #[serde(default = "default_category_field")]
    pub category: String,
    #[serde(default = "default_description_field")]
    pub description: String,
}

impl Default for FormFieldMap {
    fn default() -> Self {
        Self {
            amount: default_amount_field(),
            date: default_date_field(),
            vendor: default_vendor_field(),
            category: default_category_field(),
            description: default_description_field(),
        }
    }
}

impl FormFieldMap {
    /// 論理キーに対応するフィールド識別子を取得
    ///
    /// # 引数
    /// * `key` - 論理フィールドキー
    ///
    /// # 戻り値
    /// 外部フォームのフィールド識別子
    pub fn identifier(&self, key: FormFieldKey) -> &str {
        match key {
            FormFieldKey::Amount => &self.amount,
            FormFieldKey::Date => &self.date,
            FormFieldKey::Vendor => &self.vendor,
            FormFieldKey::Category => &self.category,
            FormFieldKey::Description => &self.description,
        }
    }
}

/// フォーム送信設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    /// 外部フォームのURL（空文字列は未設定）
    #[serde(rename = "formUrl", default)]
    pub form_url: String,
    /// フィールドマッピング
    #[serde(default)]
    pub fields: FormFieldMap,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            form_url: String::new(),
            fields: FormFieldMap::default(),
        }
    }
}

impl FormConfig {
    /// フォームURLが設定されているかどうか
    pub fn has_form_url(&self) -> bool {
        !self.form_url.trim().is_empty()
    }
}

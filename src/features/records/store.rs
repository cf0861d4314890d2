use crate::features::records::models::ReceiptRecord;
use crate::features::settings::models::{DisplayMode, FormConfig};
use log::{debug, warn};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::PathBuf;

/// レシート一覧のエントリファイル名
const RECEIPTS_ENTRY: &str = "receipts.json";
/// フォーム設定のエントリファイル名
const FORM_CONFIG_ENTRY: &str = "form_config.json";
/// 表示モードのエントリファイル名
const DISPLAY_MODE_ENTRY: &str = "theme.json";

/// ローカルレコードストア
///
/// ストアディレクトリ配下に独立した3つのJSONエントリ（レシート一覧、
/// フォーム設定、表示モード）を読み書きする。すべて同期・ベストエフォート:
/// 読み書きの失敗は握りつぶしてログに残し、呼び出し側にはデフォルト値を
/// 返す。スキーマバージョンもマイグレーションも持たず、壊れた内容は
/// 「存在しない」ものとして扱う。
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    /// レコードストアを作成する
    ///
    /// # 引数
    /// * `dir` - エントリファイルを置くディレクトリ
    ///
    /// # 戻り値
    /// レコードストア（ディレクトリ作成に失敗しても後続の読み書きが
    /// 個別にフォールバックするため、エラーにはしない）
    pub fn new(dir: PathBuf) -> Self {
        if let Err(e) = fs::create_dir_all(&dir) {
            warn!("ストアディレクトリの作成に失敗しました: {}: {e}", dir.display());
        }
        Self { dir }
    }

    /// レシート一覧を読み込む
    ///
    /// # 戻り値
    /// 保存されたレシート一覧。エントリが存在しない、または内容が
    /// 不正な場合は空の一覧
    pub fn load_receipts(&self) -> Vec<ReceiptRecord> {
        self.read_entry(RECEIPTS_ENTRY).unwrap_or_default()
    }

    /// レシート一覧を保存する
    ///
    /// # 引数
    /// * `receipts` - 保存するレシート一覧
    pub fn save_receipts(&self, receipts: &[ReceiptRecord]) {
        self.write_entry(RECEIPTS_ENTRY, &receipts);
    }

    /// フォーム設定を読み込む
    ///
    /// # 戻り値
    /// 保存されたフォーム設定。存在しない・不正な場合はデフォルト設定
    pub fn load_form_config(&self) -> FormConfig {
        self.read_entry(FORM_CONFIG_ENTRY).unwrap_or_default()
    }

    /// フォーム設定を保存する
    ///
    /// # 引数
    /// * `config` - 保存するフォーム設定
    pub fn save_form_config(&self, config: &FormConfig) {
        self.write_entry(FORM_CONFIG_ENTRY, config);
    }

    /// 表示モードを読み込む
    ///
    /// # 戻り値
    /// 保存された表示モード。存在しない・不正な場合はライトモード
    pub fn load_display_mode(&self) -> DisplayMode {
        self.read_entry(DISPLAY_MODE_ENTRY).unwrap_or_default()
    }

    /// 表示モードを保存する
    ///
    /// # 引数
    /// * `mode` - 保存する表示モード
    pub fn save_display_mode(&self, mode: DisplayMode) {
        self.write_entry(DISPLAY_MODE_ENTRY, &mode);
    }

    /// エントリを読み込む（失敗時はNone）
    fn read_entry<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let path = self.dir.join(name);

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                // 初回起動ではエントリが存在しないのが通常ケース
                debug!("エントリ {name} を読み込めませんでした: {e}");
                return None;
            }
        };

        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                // 壊れた内容は「存在しない」扱いにしてデフォルトに落とす
                warn!("エントリ {name} の内容が不正です（デフォルト値を使用）: {e}");
                None
            }
        }
    }

    /// エントリを書き込む（失敗は握りつぶしてログのみ）
    fn write_entry<T: Serialize>(&self, name: &str, value: &T) {
        let path = self.dir.join(name);

        let text = match serde_json::to_string(value) {
            Ok(text) => text,
            Err(e) => {
                warn!("エントリ {name} のシリアライズに失敗しました: {e}");
                return;
            }
        };

        if let Err(e) = fs::write(&path, text) {
            warn!("エントリ {name} の書き込みに失敗しました: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::records::models::{Category, ReceiptStatus};
    use tempfile::tempdir;

    fn sample_record(id: &str, amount: f64) -> ReceiptRecord {
        ReceiptRecord {
            id: id.to_string(),
            amount,
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
    fn test_receipts_roundtrip() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().to_path_buf());

        let receipts = vec![sample_record("a", 450.0), sample_record("b", 120.5)];
        store.save_receipts(&receipts);

        // 保存して読み込むと要素単位で等しい
        let loaded = store.load_receipts();
        assert_eq!(loaded, receipts);
    }

    #[test]
    fn test_load_receipts_missing_entry() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().to_path_buf());

        // エントリが存在しない場合は空の一覧
        assert!(store.load_receipts().is_empty());
    }

    #[test]
    fn test_load_receipts_corrupted_entry() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().to_path_buf());

        // 書き込み途中のクラッシュ等で壊れたJSONは空の一覧として読む
        fs::write(dir.path().join(RECEIPTS_ENTRY), "[{\"id\": \"a\",").unwrap();
        assert!(store.load_receipts().is_empty());
    }

    #[test]
    fn test_form_config_roundtrip() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().to_path_buf());

        // 保存前はデフォルト設定
        assert_eq!(store.load_form_config(), FormConfig::default());

        let mut config = FormConfig::default();
        config.form_url = "https://docs.google.com/forms/d/e/abc/viewform".to_string();
        config.fields.amount = "entry.1111".to_string();
        store.save_form_config(&config);

        assert_eq!(store.load_form_config(), config);
    }

    #[test]
    fn test_form_config_partial_entry_refilled() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().to_path_buf());

        // 欠けたキーはデフォルトで補完される
        fs::write(
            dir.path().join(FORM_CONFIG_ENTRY),
            r#"{"formUrl": "https://example.com/viewform", "fields": {"amount": "entry.42"}}"#,
        )
        .unwrap();

        let config = store.load_form_config();
        assert_eq!(config.form_url, "https://example.com/viewform");
        assert_eq!(config.fields.amount, "entry.42");
        assert_eq!(config.fields.date, "entry.2");
    }

    #[test]
    fn test_display_mode_roundtrip() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().to_path_buf());

        // デフォルトはライトモード
        assert_eq!(store.load_display_mode(), DisplayMode::Light);

        store.save_display_mode(DisplayMode::Dark);
        assert_eq!(store.load_display_mode(), DisplayMode::Dark);

        // 壊れた内容はデフォルトに戻る
        fs::write(dir.path().join(DISPLAY_MODE_ENTRY), "???").unwrap();
        assert_eq!(store.load_display_mode(), DisplayMode::Light);
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        // ストアディレクトリの位置に通常ファイルを置き、書き込みを失敗させる
        let dir = tempdir().unwrap();
        let blocked = dir.path().join("blocked");
        fs::write(&blocked, "not a directory").unwrap();

        let store = RecordStore::new(blocked);

        // 保存も読み込みもパニックせず、読み込みは空の一覧に落ちる
        store.save_receipts(&[sample_record("a", 1.0)]);
        assert!(store.load_receipts().is_empty());
    }
}

/// 設定機能モジュール
///
/// このモジュールはユーザー設定の管理を提供します：
/// - フォーム送信設定（フォームURLと5つのフィールド識別子マッピング）
/// - フォームHTMLからのフィールド識別子の自動推定
/// - 表示モード（ライト/ダーク）の取得と切り替え
// サブモジュールの宣言
pub mod commands;
pub mod models;

// 公開インターフェース：外部から使用可能な型と関数をエクスポート
pub use models::{DisplayMode, FormConfig, FormFieldKey, FormFieldMap};

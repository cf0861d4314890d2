/// レビュー/編集機能モジュール
///
/// このモジュールは確定前の下書きレコードの管理を提供します：
/// - 下書きの保持（常に最大1件）と解析待ちの追跡
/// - フィールド単位の編集（カテゴリ丸め込みと金額解析のみ検証）
/// - 確定によるレコードストアへの追加
// サブモジュールの宣言
pub mod commands;
pub mod session;

// 公開インターフェース：外部から使用可能な型と関数をエクスポート
pub use session::{DraftField, ReviewSession, ReviewState};

/// 送信機能モジュール
///
/// このモジュールは確定済みレコードの外部フォームへの送信を提供します：
/// - 設定されたフィールド識別子へのレコード値のマッピング
/// - URLエンコードしたボディのPOST（閲覧用パスを送信用パスに書き換え）
/// - ベストエフォートの成否判定（応答は不透明、リトライなし）
// サブモジュールの宣言
pub mod commands;
pub mod relay;

// 公開インターフェース：外部から使用可能な型と関数をエクスポート
pub use commands::SubmitOutcome;
pub use relay::{RelayOutcome, SubmissionRelay};

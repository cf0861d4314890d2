/// 抽出機能モジュール
///
/// このモジュールは外部AIサービスによる構造化データ抽出を提供します：
/// - レシート画像からの金額・日付・店舗・カテゴリ等の抽出
/// - フォームHTMLからのフィールド識別子の推定
///
/// どちらの呼び出しも単発・リトライなしで、失敗時は呼び出し側が
/// フォールバック値に切り替える契約です。
// サブモジュールの宣言
pub mod gateway;
pub mod models;

// 公開インターフェース：外部から使用可能な型と関数をエクスポート
pub use gateway::ExtractionGateway;
pub use models::{FormFieldExtraction, ReceiptExtraction};

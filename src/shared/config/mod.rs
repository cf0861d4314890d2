/// 設定関連モジュール
///
/// 環境変数の読み込み、ログシステムの初期化、Gemini API設定を提供します。
pub mod environment;

/// キャプチャ機能モジュール
///
/// このモジュールはレシート画像の取得と下書き作成を提供します：
/// - カメラ経由（webviewで撮影したフレーム）とファイル選択経由の2経路
/// - 画像ファイルのdata URLへのエンコード
/// - AI抽出の結果からの下書き構築（失敗時はゼロ値フォールバック）
// サブモジュールの宣言
pub mod commands;
pub mod image;

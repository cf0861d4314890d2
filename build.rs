use std::env;

fn main() {
    // ビルド時に環境変数を設定
    // 環境変数は外部（スクリプトや `tauri dev` 実行時の .env ファイル）から提供されることを前提とする
    // 開発環境では .env ファイルが自動的に読み込まれる
    let _ = dotenv::dotenv();

    let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

    println!("cargo:rustc-env=ENVIRONMENT={}", environment);

    // Gemini API設定
    let gemini_api_key = env::var("GEMINI_API_KEY").unwrap_or_default();
    let gemini_base_url = env::var("GEMINI_API_BASE_URL")
        .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());
    let gemini_model =
        env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-3-pro-preview".to_string());
    let gemini_timeout = env::var("GEMINI_TIMEOUT_SECONDS").unwrap_or_else(|_| "30".to_string());

    println!("cargo:rustc-env=GEMINI_API_KEY={}", gemini_api_key);
    println!("cargo:rustc-env=GEMINI_API_BASE_URL={}", gemini_base_url);
    println!("cargo:rustc-env=GEMINI_MODEL={}", gemini_model);
    println!("cargo:rustc-env=GEMINI_TIMEOUT_SECONDS={}", gemini_timeout);

    // ログレベル
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    println!("cargo:rustc-env=LOG_LEVEL={}", log_level);

    // ビルド情報を出力
    println!("cargo:warning=ビルド環境: {}", environment);

    tauri_build::build()
}

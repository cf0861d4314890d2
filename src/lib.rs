// 機能モジュール構造
pub mod features;
pub mod shared;

// 機能モジュールからコマンドをインポート
use features::extraction::ExtractionGateway;
use features::navigation::ViewRouter;
use features::records::RecordStore;
use features::review::ReviewSession;
use features::submission::SubmissionRelay;
use features::{
    capture::commands as capture_commands, navigation::commands as navigation_commands,
    records::commands as record_commands, review::commands as review_commands,
    settings::commands as settings_commands, submission::commands as submission_commands,
};
use log::info;
use shared::config::environment::{
    initialize_logging_system, load_environment_variables, GeminiConfig,
};
use std::sync::Mutex;
use tauri::Manager;

/// アプリケーション状態
///
/// レコードストア、レビューセッション、ビュールーターを保持する。
/// すべてのコマンドはここのMutexを通して状態を変更するため、
/// 読み書きの競合は起きない。
pub struct AppState {
    pub store: Mutex<RecordStore>,
    pub session: Mutex<ReviewSession>,
    pub router: Mutex<ViewRouter>,
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            eprintln!("=== アプリケーション初期化開始 ===");

            // 環境に応じた.envファイルを読み込み（ログシステム初期化前に実行）
            load_environment_variables();

            // ログシステムを初期化（.envファイル読み込み後）
            initialize_logging_system();

            info!("アプリケーション初期化を開始します...");

            // Gemini API設定を読み込み
            let gemini_config = GeminiConfig::from_env();
            if let Err(e) = gemini_config.validate() {
                // APIキーなしでも起動は続行する（解析はフォールバック下書きに落ちる）
                log::warn!("Gemini設定の検証に失敗しました: {e}");
            }

            // 抽出ゲートウェイを初期化
            let gateway = ExtractionGateway::new(gemini_config)
                .map_err(|e| format!("抽出ゲートウェイの初期化に失敗しました: {e}"))?;
            app.manage(gateway);

            // 送信リレーを初期化
            let relay = SubmissionRelay::new()
                .map_err(|e| format!("送信リレーの初期化に失敗しました: {e}"))?;
            app.manage(relay);

            // レコードストアをアプリデータディレクトリ配下に配置
            let app_data_dir = app
                .path()
                .app_data_dir()
                .map_err(|e| format!("アプリデータディレクトリの取得に失敗しました: {e}"))?;
            let store_dir = app_data_dir.join("store");

            app.manage(AppState {
                store: Mutex::new(RecordStore::new(store_dir)),
                session: Mutex::new(ReviewSession::new()),
                router: Mutex::new(ViewRouter::new()),
            });

            eprintln!("=== アプリケーション初期化完了 ===");
            info!("アプリケーション初期化が完了しました");

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // レコードコマンド
            record_commands::get_receipts,
            record_commands::get_spending_summary,
            record_commands::delete_receipt,
            record_commands::clear_receipts,
            // キャプチャコマンド
            capture_commands::capture_receipt,
            capture_commands::capture_receipt_file,
            // レビューコマンド
            review_commands::get_review_state,
            review_commands::update_draft_field,
            review_commands::confirm_draft,
            review_commands::discard_draft,
            // 送信コマンド
            submission_commands::submit_receipt,
            // 設定コマンド
            settings_commands::get_form_config,
            settings_commands::update_form_config,
            settings_commands::map_form_fields,
            settings_commands::get_display_mode,
            settings_commands::toggle_display_mode,
            // ナビゲーションコマンド
            navigation_commands::get_current_view,
            navigation_commands::navigate_to,
            navigation_commands::go_back,
        ])
        .run(tauri::generate_context!())
        .expect("Tauriアプリケーションの実行中にエラーが発生しました");
}

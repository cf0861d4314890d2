// 設定機能のTauriコマンドハンドラー

use crate::features::extraction::ExtractionGateway;
use crate::features::settings::models::{DisplayMode, FormConfig, FormFieldMap};
use crate::shared::errors::AppError;
use crate::AppState;
use log::info;
use tauri::State;

/// フォーム送信設定を取得する
///
/// # 引数
/// * `state` - アプリケーション状態
///
/// # 戻り値
/// フォーム設定（未保存の場合はデフォルト）、または失敗時はエラーメッセージ
#[tauri::command]
pub async fn get_form_config(state: State<'_, AppState>) -> Result<FormConfig, String> {
    let store = state
        .store
        .lock()
        .map_err(|e| AppError::concurrency(format!("ストアロック取得失敗: {e}")))?;

    Ok(store.load_form_config())
}

/// フォーム送信設定を更新する
///
/// 欠けたフィールドキーはデシリアライズ時にデフォルト識別子で補完される。
/// 識別子の形式は検証しない。
///
/// # 引数
/// * `config` - 新しいフォーム設定
/// * `state` - アプリケーション状態
///
/// # 戻り値
/// 保存された設定、または失敗時はエラーメッセージ
#[tauri::command]
pub async fn update_form_config(
    config: FormConfig,
    state: State<'_, AppState>,
) -> Result<FormConfig, String> {
    let store = state
        .store
        .lock()
        .map_err(|e| AppError::concurrency(format!("ストアロック取得失敗: {e}")))?;

    store.save_form_config(&config);

    info!("フォーム設定を更新しました");
    Ok(config)
}

/// フォームHTMLからフィールド識別子を推定してマッピングに反映する
///
/// # 引数
/// * `html` - フォームのHTMLソース
/// * `state` - アプリケーション状態
/// * `gateway` - 抽出ゲートウェイ
///
/// # 戻り値
/// 更新後のフィールドマッピング、または推定失敗時はエラーメッセージ
#[tauri::command]
pub async fn map_form_fields(
    html: String,
    state: State<'_, AppState>,
    gateway: State<'_, ExtractionGateway>,
) -> Result<FormFieldMap, String> {
    // 抽出が終わるまでロックは取らない
    let extracted = gateway
        .extract_form_fields(&html)
        .await
        .map_err(String::from)?;

    let store = state
        .store
        .lock()
        .map_err(|e| AppError::concurrency(format!("ストアロック取得失敗: {e}")))?;

    let mut config = store.load_form_config();
    config.fields = FormFieldMap {
        amount: extracted.amount,
        date: extracted.date,
        vendor: extracted.vendor,
        category: extracted.category,
        description: extracted.description,
    };
    store.save_form_config(&config);

    info!("フォームHTMLからフィールドマッピングを更新しました");
    Ok(config.fields)
}

/// 表示モードを取得する
///
/// # 引数
/// * `state` - アプリケーション状態
///
/// # 戻り値
/// 表示モード、または失敗時はエラーメッセージ
#[tauri::command]
pub async fn get_display_mode(state: State<'_, AppState>) -> Result<DisplayMode, String> {
    let store = state
        .store
        .lock()
        .map_err(|e| AppError::concurrency(format!("ストアロック取得失敗: {e}")))?;

    Ok(store.load_display_mode())
}

/// 表示モードを切り替える
///
/// # 引数
/// * `state` - アプリケーション状態
///
/// # 戻り値
/// 切り替え後の表示モード、または失敗時はエラーメッセージ
#[tauri::command]
pub async fn toggle_display_mode(state: State<'_, AppState>) -> Result<DisplayMode, String> {
    let store = state
        .store
        .lock()
        .map_err(|e| AppError::concurrency(format!("ストアロック取得失敗: {e}")))?;

    let mode = store.load_display_mode().toggled();
    store.save_display_mode(mode);

    Ok(mode)
}

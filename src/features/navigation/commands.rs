// ナビゲーションのTauriコマンドハンドラー

use crate::features::navigation::AppView;
use crate::shared::errors::AppError;
use crate::AppState;
use tauri::State;

/// 現在の画面を取得する
///
/// # 引数
/// * `state` - アプリケーション状態
///
/// # 戻り値
/// 現在の画面、または失敗時はエラーメッセージ
#[tauri::command]
pub async fn get_current_view(state: State<'_, AppState>) -> Result<AppView, String> {
    let router = state
        .router
        .lock()
        .map_err(|e| AppError::concurrency(format!("ルーターロック取得失敗: {e}")))?;

    Ok(router.current())
}

/// 指定した画面へ遷移する
///
/// # 引数
/// * `view` - 遷移先の画面
/// * `state` - アプリケーション状態
///
/// # 戻り値
/// 遷移後の画面、または失敗時はエラーメッセージ
#[tauri::command]
pub async fn navigate_to(view: AppView, state: State<'_, AppState>) -> Result<AppView, String> {
    let mut router = state
        .router
        .lock()
        .map_err(|e| AppError::concurrency(format!("ルーターロック取得失敗: {e}")))?;

    router.navigate(view);
    Ok(router.current())
}

/// 前の画面へ戻る（常にダッシュボード）
///
/// # 引数
/// * `state` - アプリケーション状態
///
/// # 戻り値
/// 遷移後の画面、または失敗時はエラーメッセージ
#[tauri::command]
pub async fn go_back(state: State<'_, AppState>) -> Result<AppView, String> {
    let mut router = state
        .router
        .lock()
        .map_err(|e| AppError::concurrency(format!("ルーターロック取得失敗: {e}")))?;

    Ok(router.back())
}

// レコード管理のTauriコマンドハンドラー

use crate::features::records::models::{Category, ReceiptRecord, SpendingSummary};
use crate::features::records::repository;
use crate::shared::errors::AppError;
use crate::AppState;
use log::info;
use tauri::State;

/// レシート一覧を取得する（カテゴリと件数でフィルタリング可能）
///
/// # 引数
/// * `category` - カテゴリラベルフィルター（オプション）
/// * `limit` - 先頭からの最大件数（オプション）
/// * `state` - アプリケーション状態
///
/// # 戻り値
/// レシートのリスト、または失敗時はエラーメッセージ
#[tauri::command]
pub async fn get_receipts(
    category: Option<String>,
    limit: Option<usize>,
    state: State<'_, AppState>,
) -> Result<Vec<ReceiptRecord>, String> {
    let store = state
        .store
        .lock()
        .map_err(|e| AppError::concurrency(format!("ストアロック取得失敗: {e}")))?;

    let receipts = store.load_receipts();
    let category = category.as_deref().map(Category::coerce);

    Ok(repository::filter(&receipts, category, limit))
}

/// 支出サマリーを取得する
///
/// # 引数
/// * `state` - アプリケーション状態
///
/// # 戻り値
/// 合計・カテゴリ別・件数・平均のサマリー、または失敗時はエラーメッセージ
#[tauri::command]
pub async fn get_spending_summary(state: State<'_, AppState>) -> Result<SpendingSummary, String> {
    let store = state
        .store
        .lock()
        .map_err(|e| AppError::concurrency(format!("ストアロック取得失敗: {e}")))?;

    let receipts = store.load_receipts();
    Ok(repository::spending_summary(&receipts))
}

/// レシートを削除する
///
/// # 引数
/// * `id` - レコードID
/// * `state` - アプリケーション状態
///
/// # 戻り値
/// 成功時は空、失敗時はエラーメッセージ
#[tauri::command]
pub async fn delete_receipt(id: String, state: State<'_, AppState>) -> Result<(), String> {
    let store = state
        .store
        .lock()
        .map_err(|e| AppError::concurrency(format!("ストアロック取得失敗: {e}")))?;

    let mut receipts = store.load_receipts();
    repository::delete(&mut receipts, &id).map_err(String::from)?;
    store.save_receipts(&receipts);

    info!("レシートを削除しました: id={id}");
    Ok(())
}

/// 全レシートを削除する
///
/// # 引数
/// * `state` - アプリケーション状態
///
/// # 戻り値
/// 成功時は空、失敗時はエラーメッセージ
#[tauri::command]
pub async fn clear_receipts(state: State<'_, AppState>) -> Result<(), String> {
    let store = state
        .store
        .lock()
        .map_err(|e| AppError::concurrency(format!("ストアロック取得失敗: {e}")))?;

    store.save_receipts(&[]);

    info!("全レシートを削除しました");
    Ok(())
}

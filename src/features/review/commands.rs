// レビュー/編集セッションのTauriコマンドハンドラー

use crate::features::navigation::AppView;
use crate::features::records::models::ReceiptRecord;
use crate::features::records::repository;
use crate::features::review::session::{DraftField, ReviewState};
use crate::shared::errors::AppError;
use crate::AppState;
use log::info;
use tauri::State;

/// レビューセッションの状態を取得する
///
/// # 引数
/// * `state` - アプリケーション状態
///
/// # 戻り値
/// 解析中フラグと現在の下書き、または失敗時はエラーメッセージ
#[tauri::command]
pub async fn get_review_state(state: State<'_, AppState>) -> Result<ReviewState, String> {
    let session = state
        .session
        .lock()
        .map_err(|e| AppError::concurrency(format!("セッションロック取得失敗: {e}")))?;

    Ok(session.state())
}

/// 下書きのフィールドを1つ上書きする
///
/// # 引数
/// * `field` - 対象フィールド
/// * `value` - 新しい値（文字列表現）
/// * `state` - アプリケーション状態
///
/// # 戻り値
/// 更新後の下書き、または失敗時はエラーメッセージ
#[tauri::command]
pub async fn update_draft_field(
    field: DraftField,
    value: String,
    state: State<'_, AppState>,
) -> Result<ReceiptRecord, String> {
    let mut session = state
        .session
        .lock()
        .map_err(|e| AppError::concurrency(format!("セッションロック取得失敗: {e}")))?;

    let draft = session.set_field(field, &value).map_err(String::from)?;
    Ok(draft.clone())
}

/// 下書きを確定してレコードストアへ追加する
///
/// 確定後はダッシュボードへ戻る。確定したレコードの取り消し手段は
/// 明示的な削除のみ。
///
/// # 引数
/// * `state` - アプリケーション状態
///
/// # 戻り値
/// 確定されたレコード、または失敗時はエラーメッセージ
#[tauri::command]
pub async fn confirm_draft(state: State<'_, AppState>) -> Result<ReceiptRecord, String> {
    let record = {
        let mut session = state
            .session
            .lock()
            .map_err(|e| AppError::concurrency(format!("セッションロック取得失敗: {e}")))?;
        session.take_confirmed().map_err(String::from)?
    };

    {
        let store = state
            .store
            .lock()
            .map_err(|e| AppError::concurrency(format!("ストアロック取得失敗: {e}")))?;

        let mut receipts = store.load_receipts();
        repository::prepend(&mut receipts, record.clone());
        store.save_receipts(&receipts);
    }

    let mut router = state
        .router
        .lock()
        .map_err(|e| AppError::concurrency(format!("ルーターロック取得失敗: {e}")))?;
    router.navigate(AppView::Dashboard);

    info!("下書きを確定しました: id={}", record.id);
    Ok(record)
}

/// 下書きを破棄する
///
/// # 引数
/// * `state` - アプリケーション状態
///
/// # 戻り値
/// 成功時は空、失敗時はエラーメッセージ
#[tauri::command]
pub async fn discard_draft(state: State<'_, AppState>) -> Result<(), String> {
    let mut session = state
        .session
        .lock()
        .map_err(|e| AppError::concurrency(format!("セッションロック取得失敗: {e}")))?;

    session.discard();
    Ok(())
}

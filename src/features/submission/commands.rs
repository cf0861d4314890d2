// フォーム送信のTauriコマンドハンドラー

use crate::features::navigation::AppView;
use crate::features::records::models::ReceiptStatus;
use crate::features::records::repository;
use crate::features::submission::relay::{RelayOutcome, SubmissionRelay};
use crate::shared::errors::AppError;
use crate::AppState;
use log::info;
use serde::{Deserialize, Serialize};
use tauri::State;

/// 送信コマンドの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// 送信できた（ベストエフォート）。レコードはsubmittedに遷移済み
    Submitted,
    /// フォームURLが未設定。送信は行わず設定画面へ誘導した
    MissingFormUrl,
}

/// レコードをフォームへ送信する
///
/// フォームURLが未設定の場合はエラーにせず、設定画面へ誘導して
/// `MissingFormUrl`を返す。転送エラー時はレコードをpendingのまま残す。
///
/// # 引数
/// * `id` - レコードID
/// * `state` - アプリケーション状態
/// * `relay` - 送信リレー
///
/// # 戻り値
/// 送信結果、または失敗時はエラーメッセージ
#[tauri::command]
pub async fn submit_receipt(
    id: String,
    state: State<'_, AppState>,
    relay: State<'_, SubmissionRelay>,
) -> Result<SubmitOutcome, String> {
    // 設定と対象レコードを読み出す（ロックはawaitの前に手放す）
    let (config, record) = {
        let store = state
            .store
            .lock()
            .map_err(|e| AppError::concurrency(format!("ストアロック取得失敗: {e}")))?;

        let config = store.load_form_config();
        let receipts = store.load_receipts();
        let record = repository::find_by_id(&receipts, &id)
            .map_err(String::from)?
            .clone();

        (config, record)
    };

    if record.status == ReceiptStatus::Submitted {
        return Err(AppError::validation("このレシートは既に送信済みです").into());
    }

    // フォームURL未設定: 送信せずに設定画面へ誘導する
    if !config.has_form_url() {
        let mut router = state
            .router
            .lock()
            .map_err(|e| AppError::concurrency(format!("ルーターロック取得失敗: {e}")))?;
        router.navigate(AppView::Settings);

        info!("フォームURLが未設定のため設定画面へ誘導しました: record_id={id}");
        return Ok(SubmitOutcome::MissingFormUrl);
    }

    match relay.send(&config, &record).await {
        RelayOutcome::Sent => {
            let store = state
                .store
                .lock()
                .map_err(|e| AppError::concurrency(format!("ストアロック取得失敗: {e}")))?;

            let mut receipts = store.load_receipts();
            repository::mark_submitted(&mut receipts, &id).map_err(String::from)?;
            store.save_receipts(&receipts);

            info!("レシートを送信済みにしました: id={id}");
            Ok(SubmitOutcome::Submitted)
        }
        // 転送エラー: statusはpendingのまま変更しない
        RelayOutcome::TransportError(message) => Err(AppError::relay(message).into()),
    }
}

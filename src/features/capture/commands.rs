// キャプチャ機能のTauriコマンドハンドラー
//
// カメラ経由（webviewで撮影したフレームのdata URL）とファイル選択経由の
// 2経路がここで合流し、同じ下書き構築処理に流れ込む。

use crate::features::capture::image;
use crate::features::extraction::{ExtractionGateway, ReceiptExtraction};
use crate::features::navigation::AppView;
use crate::features::records::models::{Category, ReceiptRecord, ReceiptStatus};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils;
use crate::AppState;
use log::{info, warn};
use std::path::Path;
use tauri::State;

/// フォールバック下書きの通貨コード
const FALLBACK_CURRENCY: &str = "INR";

/// キャプチャした画像から下書きレコードを作成する
///
/// 解析中フラグを立ててレビュー画面へ遷移し、AI抽出の結果から下書きを
/// 構築する。抽出に失敗してもワークフローは止めず、ゼロ値の下書きに
/// 切り替える。
///
/// # 引数
/// * `image` - キャプチャした画像（data URL）
/// * `state` - アプリケーション状態
/// * `gateway` - 抽出ゲートウェイ
///
/// # 戻り値
/// 作成された下書きレコード、または失敗時はエラーメッセージ
#[tauri::command]
pub async fn capture_receipt(
    image: String,
    state: State<'_, AppState>,
    gateway: State<'_, ExtractionGateway>,
) -> Result<ReceiptRecord, String> {
    run_capture(image, &state, &gateway)
        .await
        .map_err(String::from)
}

/// 画像ファイルから下書きレコードを作成する（ファイル選択経路）
///
/// # 引数
/// * `path` - 選択された画像ファイルのパス
/// * `state` - アプリケーション状態
/// * `gateway` - 抽出ゲートウェイ
///
/// # 戻り値
/// 作成された下書きレコード、または失敗時はエラーメッセージ
#[tauri::command]
pub async fn capture_receipt_file(
    path: String,
    state: State<'_, AppState>,
    gateway: State<'_, ExtractionGateway>,
) -> Result<ReceiptRecord, String> {
    let image = image::encode_image_file(Path::new(&path)).map_err(String::from)?;

    run_capture(image, &state, &gateway)
        .await
        .map_err(String::from)
}

/// 両経路が合流する下書き構築処理
async fn run_capture(
    image: String,
    state: &AppState,
    gateway: &ExtractionGateway,
) -> AppResult<ReceiptRecord> {
    let draft_id = utils::generate_record_id();

    // 解析中フラグを立てる（ロックはawaitの前に手放す）
    {
        let mut session = state
            .session
            .lock()
            .map_err(|e| AppError::concurrency(format!("セッションロック取得失敗: {e}")))?;
        session.begin_analysis(draft_id.clone());
    }

    // レビュー画面へ遷移してから解析結果を待つ
    {
        let mut router = state
            .router
            .lock()
            .map_err(|e| AppError::concurrency(format!("ルーターロック取得失敗: {e}")))?;
        router.navigate(AppView::Review);
    }

    let draft = match gateway.analyze_receipt(&image).await {
        Ok(extraction) => {
            info!("レシート解析に成功しました: id={draft_id}");
            draft_from_extraction(draft_id.clone(), image, extraction)
        }
        Err(e) => {
            // 抽出失敗でレビューをブロックしない。ゼロ値の下書きに切り替える
            warn!(
                "レシート解析に失敗したためフォールバック下書きを使用します: {}",
                e.details()
            );
            fallback_draft(draft_id.clone(), image)
        }
    };

    let mut session = state
        .session
        .lock()
        .map_err(|e| AppError::concurrency(format!("セッションロック取得失敗: {e}")))?;

    // 解析中に別のキャプチャが始まっていた場合、遅れて届いた結果は採用しない
    if !session.complete_analysis(draft.clone()) {
        info!("置き換えられたキャプチャの解析結果を破棄しました: id={draft_id}");
    }

    Ok(draft)
}

/// 抽出結果から下書きレコードを構築する
fn draft_from_extraction(id: String, image: String, extraction: ReceiptExtraction) -> ReceiptRecord {
    // AI応答の金額はそのまま信用せず、有限・非負に正規化する
    let amount = if extraction.amount.is_finite() && extraction.amount >= 0.0 {
        extraction.amount
    } else {
        0.0
    };

    ReceiptRecord {
        id,
        amount,
        currency: extraction.currency,
        date: extraction.date,
        vendor: extraction.vendor,
        category: Category::coerce(&extraction.category),
        description: extraction.description,
        image_url: Some(image),
        status: ReceiptStatus::Pending,
    }
}

/// 抽出失敗時のゼロ値下書きを構築する
fn fallback_draft(id: String, image: String) -> ReceiptRecord {
    ReceiptRecord {
        id,
        amount: 0.0,
        currency: FALLBACK_CURRENCY.to_string(),
        date: utils::today_date(),
        vendor: String::new(),
        category: Category::Other,
        description: String::new(),
        image_url: Some(image),
        status: ReceiptStatus::Pending,
    }
}

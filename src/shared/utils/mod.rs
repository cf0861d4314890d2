use crate::shared::errors::{AppError, AppResult};
use chrono::Local;
use uuid::Uuid;

/// レコードID（UUID v4）を生成する
///
/// # 戻り値
/// ハイフン区切りの36文字のUUID文字列
pub fn generate_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// 今日の日付をYYYY-MM-DD形式で取得（ローカル時刻基準）
///
/// # 戻り値
/// 今日の日付文字列
pub fn today_date() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// 金額文字列を解析する
///
/// # 引数
/// * `value` - 金額の文字列表現
///
/// # 戻り値
/// 解析された金額、または解析できない場合はエラー
///
/// # 解析規則
/// - 空文字列は0として扱う
/// - 有限かつ非負の数値であること
pub fn parse_amount(value: &str) -> AppResult<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    let amount: f64 = trimmed
        .parse()
        .map_err(|_| AppError::validation("金額は数値で入力してください"))?;

    if !amount.is_finite() {
        return Err(AppError::validation("無効な金額です"));
    }

    if amount < 0.0 {
        return Err(AppError::validation("金額は0以上で入力してください"));
    }

    Ok(amount)
}

use crate::features::records::models::{
    Category, CategoryTotal, ReceiptRecord, ReceiptStatus, SpendingSummary,
};
use crate::shared::errors::{AppError, AppResult};

/// レコードを一覧の先頭に追加する
///
/// # 引数
/// * `receipts` - レシート一覧
/// * `record` - 追加するレコード
pub fn prepend(receipts: &mut Vec<ReceiptRecord>, record: ReceiptRecord) {
    receipts.insert(0, record);
}

/// IDでレコードを取得する
///
/// # 引数
/// * `receipts` - レシート一覧
/// * `id` - レコードID
///
/// # 戻り値
/// レコードへの参照、または見つからない場合はエラー
pub fn find_by_id<'a>(receipts: &'a [ReceiptRecord], id: &str) -> AppResult<&'a ReceiptRecord> {
    receipts
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| AppError::not_found("レシート"))
}

/// IDでレコードを削除する
///
/// # 引数
/// * `receipts` - レシート一覧
/// * `id` - レコードID
///
/// # 戻り値
/// 成功時はOk(())、該当レコードがない場合はエラー
///
/// # 不変条件
/// 一致する1件のみを取り除き、残りの相対順序は変えない
pub fn delete(receipts: &mut Vec<ReceiptRecord>, id: &str) -> AppResult<()> {
    let position = receipts
        .iter()
        .position(|r| r.id == id)
        .ok_or_else(|| AppError::not_found("レシート"))?;

    receipts.remove(position);
    Ok(())
}

/// レコードを送信済みにする
///
/// # 引数
/// * `receipts` - レシート一覧
/// * `id` - レコードID
///
/// # 戻り値
/// 成功時はOk(())、該当レコードがない・既に送信済みの場合はエラー
///
/// # 不変条件
/// 状態遷移はpending -> submittedの一方向のみ
pub fn mark_submitted(receipts: &mut [ReceiptRecord], id: &str) -> AppResult<()> {
    let record = receipts
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| AppError::not_found("レシート"))?;

    if record.status == ReceiptStatus::Submitted {
        return Err(AppError::validation("このレシートは既に送信済みです"));
    }

    record.status = ReceiptStatus::Submitted;
    Ok(())
}

/// レコード一覧を取得する（カテゴリと件数でフィルタリング可能）
///
/// # 引数
/// * `receipts` - レシート一覧
/// * `category` - カテゴリフィルター（オプション）
/// * `limit` - 先頭からの最大件数（オプション）
///
/// # 戻り値
/// フィルター適用後のレコード一覧（元の順序を保つ）
pub fn filter(
    receipts: &[ReceiptRecord],
    category: Option<Category>,
    limit: Option<usize>,
) -> Vec<ReceiptRecord> {
    let filtered = receipts
        .iter()
        .filter(|r| category.map_or(true, |c| r.category == c))
        .cloned();

    match limit {
        Some(n) => filtered.take(n).collect(),
        None => filtered.collect(),
    }
}

/// 合計支出を計算する
///
/// # 引数
/// * `receipts` - レシート一覧
///
/// # 戻り値
/// 全レコードの金額合計
pub fn total_spent(receipts: &[ReceiptRecord]) -> f64 {
    receipts.iter().map(|r| r.amount).sum()
}

/// カテゴリ別の支出を集計する
///
/// # 引数
/// * `receipts` - レシート一覧
///
/// # 戻り値
/// カテゴリ別合計。固定集合の全カテゴリを表示順で含み、
/// 該当レコードがないカテゴリは0になる
pub fn totals_by_category(receipts: &[ReceiptRecord]) -> Vec<CategoryTotal> {
    Category::ALL
        .into_iter()
        .map(|category| CategoryTotal {
            category,
            total: receipts
                .iter()
                .filter(|r| r.category == category)
                .map(|r| r.amount)
                .sum(),
        })
        .collect()
}

/// 支出サマリーを計算する
///
/// # 引数
/// * `receipts` - レシート一覧
///
/// # 戻り値
/// 合計・カテゴリ別・件数・平均をまとめたサマリー
pub fn spending_summary(receipts: &[ReceiptRecord]) -> SpendingSummary {
    let total = total_spent(receipts);
    let record_count = receipts.len();

    // 0件のときは平均も0（ゼロ除算を避ける）
    let average = total / record_count.max(1) as f64;

    SpendingSummary {
        total,
        by_category: totals_by_category(receipts),
        record_count,
        average,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, amount: f64, category: Category, status: ReceiptStatus) -> ReceiptRecord {
        ReceiptRecord {
            id: id.to_string(),
            amount,
            currency: "INR".to_string(),
            date: "2024-03-01".to_string(),
            vendor: "Vendor".to_string(),
            category,
            description: String::new(),
            image_url: None,
            status,
        }
    }

    #[test]
    fn test_prepend_puts_record_first() {
        let mut receipts = vec![record("a", 100.0, Category::Shopping, ReceiptStatus::Pending)];
        prepend(
            &mut receipts,
            record("b", 200.0, Category::Travel, ReceiptStatus::Pending),
        );

        assert_eq!(receipts.len(), 2);
        assert_eq!(receipts[0].id, "b");
        assert_eq!(receipts[1].id, "a");
    }

    #[test]
    fn test_find_by_id() {
        let receipts = vec![
            record("a", 100.0, Category::Shopping, ReceiptStatus::Pending),
            record("b", 200.0, Category::Travel, ReceiptStatus::Pending),
        ];

        assert_eq!(find_by_id(&receipts, "b").unwrap().amount, 200.0);

        let result = find_by_id(&receipts, "missing");
        assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let mut receipts = vec![
            record("a", 100.0, Category::Shopping, ReceiptStatus::Pending),
            record("b", 200.0, Category::Travel, ReceiptStatus::Pending),
            record("c", 300.0, Category::Business, ReceiptStatus::Submitted),
        ];

        delete(&mut receipts, "b").unwrap();

        // 一致した1件だけが消え、残りの相対順序は保たれる
        assert_eq!(receipts.len(), 2);
        assert_eq!(receipts[0].id, "a");
        assert_eq!(receipts[1].id, "c");
    }

    #[test]
    fn test_delete_missing_record() {
        let mut receipts = vec![record("a", 100.0, Category::Shopping, ReceiptStatus::Pending)];

        let result = delete(&mut receipts, "missing");
        assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
        assert_eq!(receipts.len(), 1);
    }

    #[test]
    fn test_mark_submitted_transitions_only_target() {
        let mut receipts = vec![
            record("a", 100.0, Category::Shopping, ReceiptStatus::Pending),
            record("b", 200.0, Category::Travel, ReceiptStatus::Pending),
        ];

        mark_submitted(&mut receipts, "a").unwrap();

        // 対象のレコードだけが遷移する
        assert_eq!(receipts[0].status, ReceiptStatus::Submitted);
        assert_eq!(receipts[1].status, ReceiptStatus::Pending);
    }

    #[test]
    fn test_mark_submitted_rejects_resubmission() {
        let mut receipts = vec![record(
            "a",
            100.0,
            Category::Shopping,
            ReceiptStatus::Submitted,
        )];

        // submittedからの再遷移は許さない
        let result = mark_submitted(&mut receipts, "a");
        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    #[test]
    fn test_mark_submitted_missing_record() {
        let mut receipts = vec![record("a", 100.0, Category::Shopping, ReceiptStatus::Pending)];

        let result = mark_submitted(&mut receipts, "missing");
        assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
    }

    #[test]
    fn test_filter_by_category() {
        let receipts = vec![
            record("a", 100.0, Category::FoodAndDining, ReceiptStatus::Pending),
            record("b", 200.0, Category::Travel, ReceiptStatus::Pending),
            record("c", 300.0, Category::FoodAndDining, ReceiptStatus::Pending),
        ];

        let food = filter(&receipts, Some(Category::FoodAndDining), None);
        assert_eq!(food.len(), 2);
        assert_eq!(food[0].id, "a");
        assert_eq!(food[1].id, "c");

        // フィルターなし
        assert_eq!(filter(&receipts, None, None).len(), 3);

        // 件数制限
        let limited = filter(&receipts, None, Some(2));
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].id, "a");
    }

    #[test]
    fn test_totals_by_category_covers_all_categories() {
        let receipts = vec![
            record("a", 450.0, Category::FoodAndDining, ReceiptStatus::Pending),
            record("b", 50.0, Category::FoodAndDining, ReceiptStatus::Pending),
            record("c", 300.0, Category::Travel, ReceiptStatus::Pending),
        ];

        let totals = totals_by_category(&receipts);

        // 固定集合の全カテゴリが必ず含まれる
        assert_eq!(totals.len(), Category::ALL.len());
        for (expected, actual) in Category::ALL.iter().zip(totals.iter()) {
            assert_eq!(*expected, actual.category);
        }

        let food = totals
            .iter()
            .find(|t| t.category == Category::FoodAndDining)
            .unwrap();
        assert_eq!(food.total, 500.0);

        // 該当レコードのないカテゴリは0
        let shopping = totals
            .iter()
            .find(|t| t.category == Category::Shopping)
            .unwrap();
        assert_eq!(shopping.total, 0.0);

        // カテゴリ別合計の総和は全体の合計に一致する
        let sum: f64 = totals.iter().map(|t| t.total).sum();
        assert_eq!(sum, total_spent(&receipts));
    }

    #[test]
    fn test_totals_by_category_empty_list() {
        let totals = totals_by_category(&[]);
        assert_eq!(totals.len(), Category::ALL.len());
        assert!(totals.iter().all(|t| t.total == 0.0));
    }

    #[test]
    fn test_spending_summary() {
        let receipts = vec![
            record("a", 100.0, Category::Shopping, ReceiptStatus::Pending),
            record("b", 300.0, Category::Travel, ReceiptStatus::Pending),
        ];

        let summary = spending_summary(&receipts);
        assert_eq!(summary.total, 400.0);
        assert_eq!(summary.record_count, 2);
        assert_eq!(summary.average, 200.0);
    }

    #[test]
    fn test_spending_summary_empty_list() {
        let summary = spending_summary(&[]);
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.record_count, 0);
        assert_eq!(summary.average, 0.0);
        assert_eq!(summary.by_category.len(), Category::ALL.len());
    }
}

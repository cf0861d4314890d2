/// ナビゲーション機能モジュール
///
/// 表示中の画面を示す単一の値を唯一のナビゲーション状態として保持します。
/// 履歴スタックは持たず、「戻る」は常にダッシュボードへ戻ります。
// サブモジュールの宣言
pub mod commands;

use serde::{Deserialize, Serialize};

/// アプリケーションの画面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppView {
    Dashboard,
    Capture,
    Review,
    History,
    Settings,
    Stats,
}

/// ビュールーター
///
/// 遷移は明示的なユーザー操作（タブ選択、戻る、キャプチャ完了、
/// フォームURL未設定時の設定画面誘導）でのみ起きる。
pub struct ViewRouter {
    current: AppView,
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRouter {
    /// ダッシュボードを初期画面とするルーターを作成
    pub fn new() -> Self {
        Self {
            current: AppView::Dashboard,
        }
    }

    /// 現在の画面を取得
    pub fn current(&self) -> AppView {
        self.current
    }

    /// 指定した画面へ遷移する
    ///
    /// # 引数
    /// * `view` - 遷移先の画面
    pub fn navigate(&mut self, view: AppView) {
        log::debug!("画面遷移: {:?} -> {:?}", self.current, view);
        self.current = view;
    }

    /// 戻る（常にダッシュボードへ）
    ///
    /// # 戻り値
    /// 遷移後の画面
    pub fn back(&mut self) -> AppView {
        self.navigate(AppView::Dashboard);
        self.current
    }
}

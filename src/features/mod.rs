/// 機能別モジュール
///
/// このモジュールは、アプリケーションの機能を機能別に整理したモジュール群を提供します。
/// 各機能モジュールは、その機能に関連するすべてのコード（モデル、コマンド、ストア操作、
/// 外部サービス連携）を含む自己完結型のユニットです。
// 機能モジュールの宣言
pub mod capture;
pub mod extraction;
pub mod navigation;
pub mod records;
pub mod review;
pub mod settings;
pub mod submission;

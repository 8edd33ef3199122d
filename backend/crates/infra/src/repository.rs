//! # リポジトリ実装
//!
//! 返品通知が参照・記録するデータへのアクセスを trait で抽象化し、
//! PostgreSQL 実装を提供する。
//!
//! - 参照系は見つからない場合に `Ok(None)` / 空の `Vec` を返し、エラーにしない
//! - クエリは実行時に検証する `sqlx::query_as`（`FromRow` 行型 → ドメイン型へ変換）

pub mod contractor_repository;
pub mod notification_log_repository;
pub mod reseller_settings_repository;
pub mod status_repository;
pub mod template_repository;

pub use contractor_repository::{ContractorRepository, PostgresContractorRepository};
pub use notification_log_repository::{
    NotificationLog,
    NotificationLogRepository,
    PostgresNotificationLogRepository,
};
pub use reseller_settings_repository::{
    PostgresResellerSettingsRepository,
    ResellerSettingsRepository,
};
pub use status_repository::{PostgresStatusRepository, StatusRepository};
pub use template_repository::{PostgresTemplateRepository, TemplateRepository};

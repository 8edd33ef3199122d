//! # ReturnFlow インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理とマイグレーション
//! - **リポジトリ実装**: 販売店・顧客・従業員、ステータス名、販売店設定、
//!   通知テンプレート、通知ログ
//! - **メール送信**: SMTP / SES / Noop
//! - **SMS 送信**: 通知マネージャ（HTTP ゲートウェイ）/ Noop
//!
//! ## 依存関係
//!
//! ```text
//! notification-service → infra → domain
//!                          ↘      ↓
//!                            shared
//! ```
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use returnflow_infra::{db, repository::PostgresContractorRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("postgres://localhost/returnflow").await?;
//!     db::run_migrations(&pool).await?;
//!
//!     let contractors = PostgresContractorRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;
pub mod repository;
pub mod sms;

pub use error::{InfraError, InfraErrorKind};

//! # ReturnFlow ドメイン層
//!
//! 返品ステータス変更通知の中核となるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! このクレートは DDD（ドメイン駆動設計）の原則に従い、以下を提供する:
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（例: Seller, Client）
//! - **値オブジェクト**: 識別子を持たない不変オブジェクト（例: SellerId, Differences）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! app → infra → domain
//!   ↘     ↓
//!     shared
//! ```
//!
//! ドメイン層はインフラ層（DB、外部サービス）に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`contractor`] - 販売店・顧客・従業員
//! - [`goods_return`] - 検証済みの返品通知リクエスト
//! - [`template_payload`] - テンプレート変数
//! - [`notification`] - メール・SMS 通知のモデル
//! - [`operation_result`] - 通知処理結果
//! - [`error`] - ドメイン層で発生するエラーの定義
//!
//! ## 使用例
//!
//! ```rust
//! use returnflow_domain::{DomainError, goods_return::NotificationType};
//!
//! let notification_type = NotificationType::try_from(2).unwrap();
//! assert_eq!(notification_type, NotificationType::Change);
//!
//! let error = NotificationType::try_from(0).unwrap_err();
//! assert_eq!(error, DomainError::Validation("Empty notificationType".to_string()));
//! ```

#[macro_use]
mod macros;

pub mod contractor;
pub mod error;
pub mod goods_return;
pub mod notification;
pub mod operation_result;
pub mod template_payload;

pub use error::DomainError;

//! # メール送信
//!
//! 通知メールの送信を担当するインフラストラクチャモジュール。
//!
//! - `NotificationSender` trait でメール送信を抽象化
//! - SMTP（開発用 Mailpit など）、SES（本番用）、Noop の 3 実装
//! - `NOTIFICATION_BACKEND` 環境変数でランタイム選択（選択はサービス側）
//!
//! 送信元アドレスは販売店ごとに異なるため、送信者インスタンスではなく
//! [`EmailMessage::from`] で毎回指定する。

mod noop;
mod ses;
mod smtp;

use async_trait::async_trait;
pub use noop::NoopNotificationSender;
use returnflow_domain::notification::{EmailMessage, MailEnvelope, NotificationError};
pub use ses::SesNotificationSender;
pub use smtp::SmtpNotificationSender;

/// メール送信トレイト
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを 1 通送信する
    ///
    /// `envelope` は販売店・顧客・イベントなどの付帯情報で、
    /// 実装ごとにタグやログとして扱う。
    async fn send_email(
        &self,
        email: &EmailMessage,
        envelope: &MailEnvelope,
    ) -> Result<(), NotificationError>;
}

//! Noop 通知送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。

use async_trait::async_trait;
use returnflow_domain::notification::{EmailMessage, MailEnvelope, NotificationError};

use super::NotificationSender;

/// Noop 通知送信（ログ出力のみ）
#[derive(Debug, Clone, Default)]
pub struct NoopNotificationSender;

#[async_trait]
impl NotificationSender for NoopNotificationSender {
    async fn send_email(
        &self,
        email: &EmailMessage,
        envelope: &MailEnvelope,
    ) -> Result<(), NotificationError> {
        tracing::info!(
            from = %email.from,
            to = %email.to,
            subject = %email.subject,
            reseller_id = %envelope.reseller_id,
            event = %envelope.event,
            "Noop: メール送信をスキップ"
        );
        Ok(())
    }
}

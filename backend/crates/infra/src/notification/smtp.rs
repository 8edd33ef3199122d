//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` でプレーンテキストのメールを送信する。
//! 開発環境では Mailpit（ローカル SMTP サーバー）に接続する。

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Message, header::ContentType},
};
use returnflow_domain::notification::{EmailMessage, MailEnvelope, NotificationError};

use super::NotificationSender;

/// SMTP 通知送信
pub struct SmtpNotificationSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpNotificationSender {
    /// TLS なしで `host:port` に接続する送信者を作成する（Mailpit 等のローカル SMTP 向け）
    pub fn new(host: &str, port: u16) -> Self {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Self { transport }
    }
}

/// ドメインのメールメッセージを lettre のメッセージに変換する
fn build_message(email: &EmailMessage) -> Result<Message, NotificationError> {
    Message::builder()
        .from(
            email
                .from
                .parse()
                .map_err(|e| NotificationError::SendFailed(format!("送信元アドレス不正: {e}")))?,
        )
        .to(email
            .to
            .parse()
            .map_err(|e| NotificationError::SendFailed(format!("宛先アドレス不正: {e}")))?)
        .subject(&email.subject)
        .header(ContentType::TEXT_PLAIN)
        .body(email.body.clone())
        .map_err(|e| NotificationError::SendFailed(format!("メッセージ構築失敗: {e}")))
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(reseller_id = %envelope.reseller_id, event = %envelope.event)
    )]
    async fn send_email(
        &self,
        email: &EmailMessage,
        envelope: &MailEnvelope,
    ) -> Result<(), NotificationError> {
        let message = build_message(email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SMTP 送信失敗: {e}")))?;

        Ok(())
    }
}

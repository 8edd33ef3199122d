//! SES 通知送信実装
//!
//! AWS SES v2 API でメールを送信する。本番環境で使用する。
//! 付帯情報（販売店・顧客・イベント・変更後ステータス）は SES のメッセージタグとして付与し、
//! 配信イベントの集計に使えるようにする。

use async_trait::async_trait;
use aws_sdk_sesv2::{
    Client,
    types::{Body, Content, Destination, EmailContent, Message, MessageTag},
};
use returnflow_domain::notification::{EmailMessage, MailEnvelope, NotificationError};

use super::NotificationSender;

/// SES 通知送信
pub struct SesNotificationSender {
    client: Client,
}

impl SesNotificationSender {
    /// 送信元アドレスはメッセージごとに指定する（SES で検証済みであること）
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// 付帯情報を SES のメッセージタグ `(名前, 値)` に変換する
fn envelope_tags(envelope: &MailEnvelope) -> Vec<(&'static str, String)> {
    let mut tags = vec![
        ("event", envelope.event.to_string()),
        ("reseller_id", envelope.reseller_id.to_string()),
    ];
    if let Some(client_id) = envelope.client_id {
        tags.push(("client_id", client_id.to_string()));
    }
    if let Some(status) = envelope.differences_to {
        tags.push(("differences_to", status.to_string()));
    }
    tags
}

fn content(data: &str, part: &str) -> Result<Content, NotificationError> {
    Content::builder()
        .data(data)
        .charset("UTF-8")
        .build()
        .map_err(|e| NotificationError::SendFailed(format!("{part}構築失敗: {e}")))
}

#[async_trait]
impl NotificationSender for SesNotificationSender {
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
        let destination = Destination::builder().to_addresses(&email.to).build();

        let message = EmailContent::builder()
            .simple(
                Message::builder()
                    .subject(content(&email.subject, "件名")?)
                    .body(Body::builder().text(content(&email.body, "本文")?).build())
                    .build(),
            )
            .build();

        let tags = envelope_tags(envelope)
            .into_iter()
            .map(|(name, value)| {
                MessageTag::builder()
                    .name(name)
                    .value(value)
                    .build()
                    .map_err(|e| NotificationError::SendFailed(format!("タグ構築失敗: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.client
            .send_email()
            .from_email_address(&email.from)
            .destination(destination)
            .content(message)
            .set_email_tags(Some(tags))
            .send()
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SES 送信失敗: {e}")))?;

        Ok(())
    }
}

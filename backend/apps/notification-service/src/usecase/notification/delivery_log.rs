//! # 送信記録
//!
//! 送信試行 1 回ごとにビジネスイベントを出力し、通知ログへ記録する。
//! 記録に失敗しても通知処理は継続する（ログ出力のみ）。

use std::sync::Arc;

use chrono::Utc;
use returnflow_domain::{
    contractor::{ClientId, SellerId},
    notification::{
        DeliveryChannel,
        DeliveryStatus,
        NotificationEvent,
        NotificationLogId,
        RecipientKind,
    },
};
use returnflow_infra::repository::{NotificationLog, NotificationLogRepository};
use returnflow_shared::{
    event_log::{
        error::{category, kind},
        event,
    },
    log_business_event,
};

/// 送信試行 1 回分の内容
#[derive(Debug, Clone)]
pub struct DeliveryAttempt<'a> {
    pub reseller_id:    SellerId,
    pub client_id:      Option<ClientId>,
    pub channel:        DeliveryChannel,
    pub recipient_kind: RecipientKind,
    pub recipient:      &'a str,
    pub subject:        Option<&'a str>,
    pub status:         DeliveryStatus,
    pub error_message:  Option<String>,
}

/// 送信記録
#[derive(Clone)]
pub struct DeliveryRecorder {
    logs: Arc<dyn NotificationLogRepository>,
}

impl DeliveryRecorder {
    pub fn new(logs: Arc<dyn NotificationLogRepository>) -> Self {
        Self { logs }
    }

    /// 送信試行を記録する
    pub async fn record(&self, attempt: DeliveryAttempt<'_>) {
        let channel: &str = attempt.channel.into();
        let recipient_kind: &str = attempt.recipient_kind.into();
        let event_type: &str = NotificationEvent::ChangeReturnStatus.into();
        let error_kind = match attempt.channel {
            DeliveryChannel::Email => kind::MAIL_TRANSPORT,
            DeliveryChannel::Sms => kind::SMS_GATEWAY,
        };

        match attempt.status {
            DeliveryStatus::Sent => log_business_event!(
                event.category = event::category::NOTIFICATION,
                event.action = event::action::NOTIFICATION_SENT,
                event.reseller_id = %attempt.reseller_id,
                event.entity_type = event::entity_type::NOTIFICATION_LOG,
                event.result = event::result::SUCCESS,
                event.channel = channel,
                event.recipient = recipient_kind,
                notification.event_type = event_type,
                "通知送信成功"
            ),
            DeliveryStatus::Failed => log_business_event!(
                event.category = event::category::NOTIFICATION,
                event.action = event::action::NOTIFICATION_FAILED,
                event.reseller_id = %attempt.reseller_id,
                event.entity_type = event::entity_type::NOTIFICATION_LOG,
                event.result = event::result::FAILURE,
                event.channel = channel,
                event.recipient = recipient_kind,
                notification.event_type = event_type,
                error.category = category::EXTERNAL_SERVICE,
                error.kind = error_kind,
                error = attempt.error_message.as_deref().unwrap_or_default(),
                "通知送信失敗"
            ),
        }

        let log = NotificationLog {
            id:             NotificationLogId::new(),
            reseller_id:    attempt.reseller_id,
            client_id:      attempt.client_id,
            event_type:     NotificationEvent::ChangeReturnStatus,
            channel:        attempt.channel,
            recipient_kind: attempt.recipient_kind,
            recipient:      attempt.recipient.to_string(),
            subject:        attempt.subject.map(str::to_string),
            status:         attempt.status,
            error_message:  attempt.error_message,
            sent_at:        Utc::now(),
        };

        if let Err(e) = self.logs.insert(&log).await {
            tracing::error!(error = %e, "通知ログの記録に失敗");
        }
    }
}

/// 送信を行わなかった経路をビジネスイベントとして出力する
pub fn log_skipped(
    reseller_id: SellerId,
    channel: DeliveryChannel,
    recipient_kind: RecipientKind,
    reason: &str,
) {
    let channel: &str = channel.into();
    let recipient_kind: &str = recipient_kind.into();
    log_business_event!(
        event.category = event::category::NOTIFICATION,
        event.action = event::action::NOTIFICATION_SKIPPED,
        event.reseller_id = %reseller_id,
        event.result = event::result::SUCCESS,
        event.channel = channel,
        event.recipient = recipient_kind,
        reason = reason,
        "通知送信をスキップ"
    );
}

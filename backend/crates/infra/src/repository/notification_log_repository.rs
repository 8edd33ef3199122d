//! # NotificationLogRepository
//!
//! 通知ログの永続化を担当するリポジトリ。
//!
//! 送信の成功・失敗どちらも 1 試行 1 行で記録する。
//! 記録の失敗は呼び出し側でログ出力のみ行い、通知処理は継続する。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
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
use sqlx::PgPool;

use crate::error::InfraError;

/// 通知ログ（INSERT 用データ型）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationLog {
    pub id:             NotificationLogId,
    pub reseller_id:    SellerId,
    pub client_id:      Option<ClientId>,
    pub event_type:     NotificationEvent,
    pub channel:        DeliveryChannel,
    pub recipient_kind: RecipientKind,
    /// メールアドレスまたは電話番号
    pub recipient:      String,
    /// メールの場合のみ
    pub subject:        Option<String>,
    pub status:         DeliveryStatus,
    pub error_message:  Option<String>,
    pub sent_at:        DateTime<Utc>,
}

/// 通知ログリポジトリトレイト
#[async_trait]
pub trait NotificationLogRepository: Send + Sync {
    async fn insert(&self, log: &NotificationLog) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の NotificationLogRepository
#[derive(Debug, Clone)]
pub struct PostgresNotificationLogRepository {
    pool: PgPool,
}

impl PostgresNotificationLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationLogRepository for PostgresNotificationLogRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(id = %log.id))]
    async fn insert(&self, log: &NotificationLog) -> Result<(), InfraError> {
        let event_type: &str = log.event_type.into();
        let channel: &str = log.channel.into();
        let recipient_kind: &str = log.recipient_kind.into();
        let status: &str = log.status.into();

        sqlx::query(
            r#"
            INSERT INTO notification_logs (
                id, reseller_id, client_id, event_type,
                channel, recipient_kind, recipient,
                subject, status, error_message, sent_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(log.id.as_uuid())
        .bind(log.reseller_id.as_i64())
        .bind(log.client_id.map(|id| id.as_i64()))
        .bind(event_type)
        .bind(channel)
        .bind(recipient_kind)
        .bind(&log.recipient)
        .bind(log.subject.as_deref())
        .bind(status)
        .bind(log.error_message.as_deref())
        .bind(log.sent_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

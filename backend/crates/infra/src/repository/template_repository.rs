//! # TemplateRepository
//!
//! 販売店ごとに登録された通知テンプレートの本文を参照する。
//! 変数の置換はここでは行わない（サービス層の TemplateRenderer の責務）。

use async_trait::async_trait;
use returnflow_domain::contractor::SellerId;
use sqlx::PgPool;

use crate::error::InfraError;

#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// テンプレート名と販売店からテンプレート本文を取得する
    async fn find_content(
        &self,
        name: &str,
        seller_id: SellerId,
    ) -> Result<Option<String>, InfraError>;
}

/// PostgreSQL 実装の TemplateRepository
#[derive(Debug, Clone)]
pub struct PostgresTemplateRepository {
    pool: PgPool,
}

impl PostgresTemplateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateRepository for PostgresTemplateRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(name = %name, %seller_id))]
    async fn find_content(
        &self,
        name: &str,
        seller_id: SellerId,
    ) -> Result<Option<String>, InfraError> {
        let content = sqlx::query_scalar::<_, String>(
            "SELECT content FROM notification_templates WHERE seller_id = $1 AND name = $2",
        )
        .bind(seller_id.as_i64())
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(content)
    }
}

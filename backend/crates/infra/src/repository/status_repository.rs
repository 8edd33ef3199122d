//! # StatusRepository
//!
//! 返品ポジションのステータス名を解決する。

use async_trait::async_trait;
use returnflow_domain::goods_return::StatusId;
use sqlx::PgPool;

use crate::error::InfraError;

#[async_trait]
pub trait StatusRepository: Send + Sync {
    /// ステータス ID から表示名を取得する
    async fn find_name(&self, id: StatusId) -> Result<Option<String>, InfraError>;
}

/// PostgreSQL 実装の StatusRepository
#[derive(Debug, Clone)]
pub struct PostgresStatusRepository {
    pool: PgPool,
}

impl PostgresStatusRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatusRepository for PostgresStatusRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_name(&self, id: StatusId) -> Result<Option<String>, InfraError> {
        let name = sqlx::query_scalar::<_, String>(
            "SELECT name FROM goods_return_statuses WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(name)
    }
}

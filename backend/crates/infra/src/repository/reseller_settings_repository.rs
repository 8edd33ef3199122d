//! # ResellerSettingsRepository
//!
//! 販売店ごとの通知設定（送信元アドレス、権限に基づく受信者一覧）を参照する。

use async_trait::async_trait;
use returnflow_domain::contractor::SellerId;
use sqlx::PgPool;

use crate::error::InfraError;

#[async_trait]
pub trait ResellerSettingsRepository: Send + Sync {
    /// 販売店の送信元メールアドレスを取得する
    ///
    /// 未設定の場合は `None`。空文字列が保存されていても `None` とする。
    async fn find_sender_email(&self, seller_id: SellerId) -> Result<Option<String>, InfraError>;

    /// 指定の権限を持つ従業員のメールアドレス一覧を取得する
    ///
    /// 空のアドレスは含めない。重複は除いて従業員 ID 順に返す。
    async fn find_permitted_emails(
        &self,
        seller_id: SellerId,
        permission: &str,
    ) -> Result<Vec<String>, InfraError>;
}

/// PostgreSQL 実装の ResellerSettingsRepository
#[derive(Debug, Clone)]
pub struct PostgresResellerSettingsRepository {
    pool: PgPool,
}

impl PostgresResellerSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResellerSettingsRepository for PostgresResellerSettingsRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%seller_id))]
    async fn find_sender_email(&self, seller_id: SellerId) -> Result<Option<String>, InfraError> {
        let email = sqlx::query_scalar::<_, String>(
            "SELECT sender_email FROM reseller_settings WHERE seller_id = $1",
        )
        .bind(seller_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(email.filter(|e| !e.trim().is_empty()))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%seller_id, permission = %permission))]
    async fn find_permitted_emails(
        &self,
        seller_id: SellerId,
        permission: &str,
    ) -> Result<Vec<String>, InfraError> {
        let emails = sqlx::query_scalar::<_, String>(
            r#"
            SELECT e.email
            FROM employees e
            INNER JOIN employee_permissions p ON p.employee_id = e.id
            WHERE e.seller_id = $1
              AND p.permission = $2
              AND e.email IS NOT NULL
              AND e.email <> ''
            GROUP BY e.email
            ORDER BY MIN(e.id)
            "#,
        )
        .bind(seller_id.as_i64())
        .bind(permission)
        .fetch_all(&self.pool)
        .await?;

        Ok(emails)
    }
}

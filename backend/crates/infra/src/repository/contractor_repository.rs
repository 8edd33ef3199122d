//! # ContractorRepository
//!
//! 販売店・取引先（顧客）・従業員の参照を担当するリポジトリ。
//!
//! 取引先の種別（`kind`）や所属販売店の検証は行わない。
//! 返品通知の顧客としての妥当性はドメイン層で判定する。

use async_trait::async_trait;
use returnflow_domain::contractor::{
    Client,
    ClientId,
    ContractorKind,
    Employee,
    EmployeeId,
    PersonName,
    Seller,
    SellerId,
};
use sqlx::PgPool;

use crate::error::InfraError;

/// 販売店・取引先・従業員の参照トレイト
#[async_trait]
pub trait ContractorRepository: Send + Sync {
    async fn find_seller(&self, id: SellerId) -> Result<Option<Seller>, InfraError>;

    /// 取引先を取得する（種別を問わない）
    async fn find_client(&self, id: ClientId) -> Result<Option<Client>, InfraError>;

    async fn find_employee(&self, id: EmployeeId) -> Result<Option<Employee>, InfraError>;
}

#[derive(Debug, sqlx::FromRow)]
struct SellerRow {
    id:   i64,
    name: String,
}

impl TryFrom<SellerRow> for Seller {
    type Error = InfraError;

    fn try_from(row: SellerRow) -> Result<Self, Self::Error> {
        let id = SellerId::new(row.id).map_err(|e| InfraError::invalid_data(e.to_string()))?;
        Ok(Seller::new(id, row.name))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id:         i64,
    seller_id:  i64,
    kind:       String,
    name:       String,
    first_name: Option<String>,
    last_name:  Option<String>,
    email:      Option<String>,
    mobile:     Option<String>,
}

impl TryFrom<ClientRow> for Client {
    type Error = InfraError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        let id = ClientId::new(row.id).map_err(|e| InfraError::invalid_data(e.to_string()))?;
        let seller_id =
            SellerId::new(row.seller_id).map_err(|e| InfraError::invalid_data(e.to_string()))?;
        // 顧客以外の種別は細分せず Other に寄せる
        let kind = row.kind.parse().unwrap_or(ContractorKind::Other);

        Ok(Client::new(
            id,
            kind,
            seller_id,
            row.name,
            PersonName::new(row.first_name, row.last_name),
            row.email,
            row.mobile,
        ))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EmployeeRow {
    id:         i64,
    first_name: Option<String>,
    last_name:  Option<String>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = InfraError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let id = EmployeeId::new(row.id).map_err(|e| InfraError::invalid_data(e.to_string()))?;
        Ok(Employee::new(
            id,
            PersonName::new(row.first_name, row.last_name),
        ))
    }
}

/// PostgreSQL 実装の ContractorRepository
#[derive(Debug, Clone)]
pub struct PostgresContractorRepository {
    pool: PgPool,
}

impl PostgresContractorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContractorRepository for PostgresContractorRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_seller(&self, id: SellerId) -> Result<Option<Seller>, InfraError> {
        let row = sqlx::query_as::<_, SellerRow>("SELECT id, name FROM sellers WHERE id = $1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Seller::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_client(&self, id: ClientId) -> Result<Option<Client>, InfraError> {
        let row = sqlx::query_as::<_, ClientRow>(
            r#"
            SELECT id, seller_id, kind, name, first_name, last_name, email, mobile
            FROM contractors
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Client::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_employee(&self, id: EmployeeId) -> Result<Option<Employee>, InfraError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, first_name, last_name FROM employees WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Employee::try_from).transpose()
    }
}

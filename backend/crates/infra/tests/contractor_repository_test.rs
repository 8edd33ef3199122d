//! ContractorRepository 統合テスト
//!
//! データベースを使用したテスト。sqlx::test マクロを使用して、
//! テストごとに独立したデータベースを作成する。
//!
//! 実行方法:
//! ```bash
//! cargo test -p returnflow-infra --test contractor_repository_test
//! ```

mod common;

use common::{OTHER_SELLER_ID, SELLER_ID, insert_contractor, insert_employee, setup_sellers};
use pretty_assertions::assert_eq;
use returnflow_domain::contractor::{ClientId, ContractorKind, EmployeeId, SellerId};
use returnflow_infra::repository::{ContractorRepository, PostgresContractorRepository};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../migrations")]
async fn test_販売店をidで取得できる(pool: PgPool) {
    setup_sellers(&pool).await;
    let sut = PostgresContractorRepository::new(pool);

    let seller = sut.find_seller(common::seller_id()).await.unwrap().unwrap();

    assert_eq!(seller.id().as_i64(), SELLER_ID);
    assert_eq!(seller.name(), "Reseller One");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_存在しない販売店はnoneを返す(pool: PgPool) {
    setup_sellers(&pool).await;
    let sut = PostgresContractorRepository::new(pool);

    let seller = sut.find_seller(SellerId::new(999).unwrap()).await.unwrap();

    assert!(seller.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_取引先を種別と所属販売店付きで取得できる(pool: PgPool) {
    setup_sellers(&pool).await;
    insert_contractor(&pool, 5, SELLER_ID, "customer", "Client Trading", Some("jiro@client.example.com")).await;
    let sut = PostgresContractorRepository::new(pool);

    let client = sut.find_client(ClientId::new(5).unwrap()).await.unwrap().unwrap();

    assert_eq!(client.kind(), ContractorKind::Customer);
    assert_eq!(client.seller_id(), common::seller_id());
    assert_eq!(client.display_name(), "Jiro Client");
    assert_eq!(client.email(), Some("jiro@client.example.com"));
    assert_eq!(client.mobile(), Some("+81-90-1234-5678"));
    assert!(client.is_customer_of(common::seller_id()));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_他販売店や顧客以外の取引先も種別を問わず取得できる(pool: PgPool) {
    setup_sellers(&pool).await;
    insert_contractor(&pool, 6, OTHER_SELLER_ID, "customer", "Other Trading", None).await;
    insert_contractor(&pool, 7, SELLER_ID, "supplier", "Supplier Inc", None).await;
    let sut = PostgresContractorRepository::new(pool);

    let other_sellers = sut.find_client(ClientId::new(6).unwrap()).await.unwrap().unwrap();
    let supplier = sut.find_client(ClientId::new(7).unwrap()).await.unwrap().unwrap();

    assert!(!other_sellers.is_customer_of(common::seller_id()));
    assert_eq!(supplier.kind(), ContractorKind::Other);
    assert_eq!(supplier.email(), None);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_従業員をフルネーム付きで取得できる(pool: PgPool) {
    setup_sellers(&pool).await;
    insert_employee(&pool, 2, SELLER_ID, Some("taro@reseller.example.com"), &[]).await;
    let sut = PostgresContractorRepository::new(pool);

    let employee = sut.find_employee(EmployeeId::new(2).unwrap()).await.unwrap().unwrap();
    let missing = sut.find_employee(EmployeeId::new(99).unwrap()).await.unwrap();

    assert_eq!(employee.full_name(), "Taro Employee2");
    assert!(missing.is_none());
}

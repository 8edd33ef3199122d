//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するシードデータ投入ヘルパー。
//! Rust の統合テスト規約に従い `tests/common/mod.rs` に配置。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use returnflow_domain::contractor::SellerId;
use sqlx::PgPool;

pub const SELLER_ID: i64 = 1;
pub const OTHER_SELLER_ID: i64 = 2;

pub fn seller_id() -> SellerId {
    SellerId::new(SELLER_ID).unwrap()
}

pub fn other_seller_id() -> SellerId {
    SellerId::new(OTHER_SELLER_ID).unwrap()
}

/// 販売店 2 件を作成する
pub async fn setup_sellers(pool: &PgPool) {
    for (id, name) in [(SELLER_ID, "Reseller One"), (OTHER_SELLER_ID, "Reseller Two")] {
        sqlx::query("INSERT INTO sellers (id, name) VALUES ($1, $2)")
            .bind(id)
            .bind(name)
            .execute(pool)
            .await
            .expect("販売店の作成に失敗");
    }
}

/// 取引先を作成する
pub async fn insert_contractor(
    pool: &PgPool,
    id: i64,
    seller_id: i64,
    kind: &str,
    name: &str,
    email: Option<&str>,
) {
    sqlx::query(
        r#"
        INSERT INTO contractors (id, seller_id, kind, name, first_name, last_name, email, mobile)
        VALUES ($1, $2, $3, $4, 'Jiro', 'Client', $5, '+81-90-1234-5678')
        "#,
    )
    .bind(id)
    .bind(seller_id)
    .bind(kind)
    .bind(name)
    .bind(email)
    .execute(pool)
    .await
    .expect("取引先の作成に失敗");
}

/// 従業員を作成し、指定の権限を付与する
pub async fn insert_employee(
    pool: &PgPool,
    id: i64,
    seller_id: i64,
    email: Option<&str>,
    permissions: &[&str],
) {
    sqlx::query(
        r#"
        INSERT INTO employees (id, seller_id, first_name, last_name, email)
        VALUES ($1, $2, 'Taro', $3, $4)
        "#,
    )
    .bind(id)
    .bind(seller_id)
    .bind(format!("Employee{id}"))
    .bind(email)
    .execute(pool)
    .await
    .expect("従業員の作成に失敗");

    for permission in permissions {
        sqlx::query("INSERT INTO employee_permissions (employee_id, permission) VALUES ($1, $2)")
            .bind(id)
            .bind(permission)
            .execute(pool)
            .await
            .expect("権限の付与に失敗");
    }
}

//! TemplateRepository / StatusRepository 統合テスト
//!
//! 実行方法:
//! ```bash
//! cargo test -p returnflow-infra --test template_repository_test
//! ```

mod common;

use common::{OTHER_SELLER_ID, SELLER_ID, setup_sellers};
use pretty_assertions::assert_eq;
use returnflow_domain::{goods_return::StatusId, notification::template_name};
use returnflow_infra::repository::{
    PostgresStatusRepository,
    PostgresTemplateRepository,
    StatusRepository,
    TemplateRepository,
};
use sqlx::PgPool;

async fn insert_template(pool: &PgPool, seller_id: i64, name: &str, content: &str) {
    sqlx::query("INSERT INTO notification_templates (seller_id, name, content) VALUES ($1, $2, $3)")
        .bind(seller_id)
        .bind(name)
        .bind(content)
        .execute(pool)
        .await
        .expect("テンプレートの作成に失敗");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_販売店ごとのテンプレート本文を取得できる(pool: PgPool) {
    setup_sellers(&pool).await;
    insert_template(&pool, SELLER_ID, template_name::NEW_POSITION_ADDED, "追加されました").await;
    insert_template(&pool, OTHER_SELLER_ID, template_name::NEW_POSITION_ADDED, "Added").await;
    let sut = PostgresTemplateRepository::new(pool);

    let own = sut
        .find_content(template_name::NEW_POSITION_ADDED, common::seller_id())
        .await
        .unwrap();
    let other = sut
        .find_content(template_name::NEW_POSITION_ADDED, common::other_seller_id())
        .await
        .unwrap();

    assert_eq!(own.as_deref(), Some("追加されました"));
    assert_eq!(other.as_deref(), Some("Added"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_未登録のテンプレートはnoneを返す(pool: PgPool) {
    setup_sellers(&pool).await;
    let sut = PostgresTemplateRepository::new(pool);

    let content = sut
        .find_content(template_name::CLIENT_EMAIL_BODY, common::seller_id())
        .await
        .unwrap();

    assert_eq!(content, None);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_ステータス名を取得できる(pool: PgPool) {
    sqlx::query("INSERT INTO goods_return_statuses (id, name) VALUES (1, '受付'), (4, '返金済み')")
        .execute(&pool)
        .await
        .expect("ステータスの作成に失敗");
    let sut = PostgresStatusRepository::new(pool);

    assert_eq!(
        sut.find_name(StatusId::from(4)).await.unwrap().as_deref(),
        Some("返金済み")
    );
    assert_eq!(sut.find_name(StatusId::from(9)).await.unwrap(), None);
}

//! 返品通知 API 統合テスト
//!
//! ルーター全体（レイヤー込み）を oneshot で呼び出し、
//! HTTP ステータスとレスポンスボディの形状を検証する。
//!
//! ## テストケース
//!
//! - resellerId が空なら 200 と早期終了の結果
//! - notificationType の欠落・未知の値で 400
//! - 参照先なしで 400（Not Found）
//! - テンプレート変数の欠落で 500
//! - 変更通知で全経路のフラグが立つ
//! - SMS 送信側のエラーがメッセージに入る
//! - JSON でないボディで 400

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use pretty_assertions::assert_eq;
use returnflow_domain::notification::SmsReceipt;
use returnflow_notification_service::{
    app_builder::build_router,
    handler::{GoodsReturnState, ReadinessState},
    test_utils::{GoodsReturnTestBuilder, GoodsReturnTestSetup},
};
use serde_json::{Value, json};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

const ENDPOINT: &str = "/internal/goods-returns/notifications";

// --- テストヘルパー ---

fn create_test_app(setup: &GoodsReturnTestSetup) -> Router {
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy("postgres://returnflow@127.0.0.1:1/returnflow")
        .unwrap();

    build_router(
        Arc::new(GoodsReturnState {
            usecase: setup.usecase.clone(),
        }),
        Arc::new(ReadinessState { pool }),
    )
}

async fn post_json(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(ENDPOINT)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn change_body_with(key: &str, value: Value) -> Value {
    let mut body = GoodsReturnTestBuilder::change_body();
    body[key] = value;
    body
}

// --- テストケース ---

#[tokio::test]
async fn reseller_idが空なら200と早期終了の結果を返す() {
    let setup = GoodsReturnTestBuilder::new().build();
    let app = create_test_app(&setup);

    let (status, body) = post_json(app, change_body_with("resellerId", json!(""))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "notificationEmployeeByEmail": false,
            "notificationClientByEmail": false,
            "notificationClientBySms": { "isSent": false, "message": "Empty resellerId" }
        })
    );
    assert_eq!(setup.mail_sender.attempt_count(), 0);
}

#[tokio::test]
async fn notification_typeが無ければ400() {
    let setup = GoodsReturnTestBuilder::new().build();
    let mut body = GoodsReturnTestBuilder::change_body();
    if let Some(map) = body.as_object_mut() {
        map.remove("notificationType");
    }

    let (status, body) = post_json(create_test_app(&setup), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Empty notificationType");
    assert_eq!(
        body["type"],
        "https://returnflow.example.com/errors/validation-error"
    );
}

#[tokio::test]
async fn 未知のnotification_typeは400() {
    let setup = GoodsReturnTestBuilder::new().build();

    let (status, body) = post_json(
        create_test_app(&setup),
        change_body_with("notificationType", json!(9)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Unknown notificationType");
}

#[tokio::test]
async fn 存在しない顧客は400() {
    let setup = GoodsReturnTestBuilder::new().build();

    let (status, body) = post_json(
        create_test_app(&setup),
        change_body_with("clientId", json!(999)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Not Found");
    assert_eq!(body["detail"], "Client not found");
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn テンプレート変数が欠けていれば500で何も送らない() {
    let setup = GoodsReturnTestBuilder::new().build();

    let (status, body) = post_json(
        create_test_app(&setup),
        change_body_with("agreementNumber", json!("")),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Template Data (AGREEMENT_NUMBER) is empty!");
    assert_eq!(setup.mail_sender.attempt_count(), 0);
    assert!(setup.sms_sender.requests().is_empty());
}

#[tokio::test]
async fn 変更通知で全経路のフラグが立つ() {
    let setup = GoodsReturnTestBuilder::new().build();

    let (status, body) =
        post_json(create_test_app(&setup), GoodsReturnTestBuilder::change_body()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "notificationEmployeeByEmail": true,
            "notificationClientByEmail": true,
            "notificationClientBySms": { "isSent": true, "message": "" }
        })
    );
    // 従業員 2 名 + 顧客 1 名
    assert_eq!(setup.mail_sender.sent_emails().len(), 3);
}

#[tokio::test]
async fn dataで包まれたボディも処理する() {
    let setup = GoodsReturnTestBuilder::new().build();

    let (status, body) = post_json(
        create_test_app(&setup),
        json!({ "data": GoodsReturnTestBuilder::change_body() }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notificationEmployeeByEmail"], true);
}

#[tokio::test]
async fn 変更後ステータスの無い新規通知では顧客に送らない() {
    let setup = GoodsReturnTestBuilder::new().build();

    let (status, body) =
        post_json(create_test_app(&setup), GoodsReturnTestBuilder::new_body()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notificationEmployeeByEmail"], true);
    assert_eq!(body["notificationClientByEmail"], false);
    assert_eq!(
        body["notificationClientBySms"],
        json!({ "isSent": false, "message": "" })
    );
    assert!(setup.sms_sender.requests().is_empty());
}

#[tokio::test]
async fn sms送信側のエラーがメッセージに入る() {
    let setup = GoodsReturnTestBuilder::new().build();
    setup
        .sms_sender
        .respond_with(SmsReceipt::failed("number is blocked"));

    let (status, body) =
        post_json(create_test_app(&setup), GoodsReturnTestBuilder::change_body()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["notificationClientBySms"],
        json!({ "isSent": false, "message": "number is blocked" })
    );
    assert_eq!(body["notificationClientByEmail"], true);
}

#[tokio::test]
async fn jsonでないボディは400() {
    let setup = GoodsReturnTestBuilder::new().build();
    let request = Request::builder()
        .method(Method::POST)
        .uri(ENDPOINT)
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = create_test_app(&setup).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["type"], "https://returnflow.example.com/errors/bad-request");
}

#[tokio::test]
async fn オブジェクトでないボディは早期終了になる() {
    let setup = GoodsReturnTestBuilder::new().build();

    let (status, body) = post_json(create_test_app(&setup), json!([1, 2, 3])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notificationClientBySms"]["message"], "Empty resellerId");
}

#[tokio::test]
async fn 同じリクエストを繰り返しても同じ結果になる() {
    let setup = GoodsReturnTestBuilder::new().build();

    let (_, first) =
        post_json(create_test_app(&setup), GoodsReturnTestBuilder::change_body()).await;
    let (_, second) =
        post_json(create_test_app(&setup), GoodsReturnTestBuilder::change_body()).await;

    assert_eq!(first, second);
}

//! # ルーター構築
//!
//! State を受け取り、ルート定義と共通レイヤーを組み立てる。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use returnflow_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::handler::{
    GoodsReturnState,
    ReadinessState,
    health_check,
    notify_goods_return,
    readiness_check,
};

/// ルーターを構築する
///
/// レイヤーは下から順に適用される。リクエスト ID の付与がトレーススパンの作成より先に行われる。
pub fn build_router(
    goods_return_state: Arc<GoodsReturnState>,
    readiness_state: Arc<ReadinessState>,
) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .route(
            "/internal/goods-returns/notifications",
            post(notify_goods_return),
        )
        .with_state(goods_return_state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}

//! # 返品通知ハンドラ
//!
//! ```text
//! POST /internal/goods-returns/notifications
//! ```
//!
//! ボディは型付けせずに受け取り、フィールドの解釈はユースケースに任せる。
//! 処理が最後まで進んだ場合（早期終了を含む）は 200 と [`OperationResult`] を返す。

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use returnflow_domain::operation_result::OperationResult;
use serde_json::Value;

use crate::{error::CoreError, usecase::GoodsReturnUseCase};

/// 返品通知ハンドラーの State
pub struct GoodsReturnState {
    pub usecase: GoodsReturnUseCase,
}

/// 返品ステータス変更を通知する
pub async fn notify_goods_return(
    State(state): State<Arc<GoodsReturnState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<OperationResult>, CoreError> {
    let Json(body) = body.map_err(|rejection| CoreError::BadRequest(rejection.body_text()))?;

    let result = state.usecase.execute(&body).await?;
    Ok(Json(result))
}

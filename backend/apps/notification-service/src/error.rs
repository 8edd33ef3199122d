//! # Notification Service エラー定義
//!
//! 返品通知処理のエラーと、HTTP レスポンス（RFC 9457 Problem Details）への変換を定義する。
//!
//! | エラー | HTTP ステータス |
//! |--------|----------------|
//! | `BadRequest` | 400（JSON として解釈できないボディ） |
//! | `Validation` | 400 |
//! | `NotFound` | 400（参照先が存在しない場合も入力不正として扱う） |
//! | `TemplateData` | 500 |
//! | `Internal` | 500 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use returnflow_domain::DomainError;
use returnflow_infra::InfraError;
use returnflow_shared::{
    ErrorResponse,
    event_log::error::{category, kind},
};
use thiserror::Error;

/// Notification Service で発生するエラー
#[derive(Debug, Error)]
pub enum CoreError {
    /// リクエストボディを JSON として解釈できない
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// 入力値が不正
    #[error("{0}")]
    Validation(String),

    /// 参照先の販売店・顧客・従業員が存在しない
    #[error("{0}")]
    NotFound(String),

    /// テンプレート変数が空
    #[error("{0}")]
    TemplateData(String),

    /// リポジトリの失敗
    #[error("内部エラー: {0}")]
    Internal(#[from] InfraError),
}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::Validation(_) => Self::Validation(message),
            DomainError::NotFound { .. } => Self::NotFound(message),
            DomainError::EmptyTemplateField(_) => Self::TemplateData(message),
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let body = match &self {
            CoreError::BadRequest(msg) => ErrorResponse::bad_request(msg),
            CoreError::Validation(msg) => ErrorResponse::validation_error(msg),
            CoreError::NotFound(msg) => ErrorResponse::reference_not_found(msg),
            CoreError::TemplateData(msg) => {
                tracing::error!(
                    error.category = category::INFRASTRUCTURE,
                    error.kind = kind::TEMPLATE,
                    "テンプレートデータエラー: {}",
                    msg
                );
                ErrorResponse::template_data_error(msg)
            }
            CoreError::Internal(e) => {
                tracing::error!(
                    error.category = category::INFRASTRUCTURE,
                    error.kind = kind::DATABASE,
                    "内部エラー: {}",
                    e
                );
                ErrorResponse::internal_error()
            }
        };

        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}

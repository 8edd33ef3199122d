//! # エラーレスポンス（RFC 9457 Problem Details）
//!
//! 通知サービスのエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換はサービス側の責務（shared に axum 依存を入れない）
//! - 返品通知で使うエラー種別は便利コンストラクタで提供する
//!
//! 参照先が存在しない場合も 400 を返す。既存の呼び出し元は「入力が不正」として
//! 扱っており、404 にはしない。

use serde::{Deserialize, Serialize};

/// error_type URI のベースパス
const ERROR_TYPE_BASE: &str = "https://returnflow.example.com/errors";

/// エラーレスポンス（RFC 9457 Problem Details）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title:      String,
    pub status:     u16,
    pub detail:     String,
}

impl ErrorResponse {
    /// 汎用コンストラクタ
    ///
    /// `error_type_suffix` はベース URI に付加される（例: `"validation-error"`）。
    pub fn new(
        error_type_suffix: &str,
        title: impl Into<String>,
        status: u16,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            error_type: format!("{ERROR_TYPE_BASE}/{error_type_suffix}"),
            title: title.into(),
            status,
            detail: detail.into(),
        }
    }

    /// 400 Bad Request（JSON として解釈できないボディなど）
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new("bad-request", "Bad Request", 400, detail)
    }

    /// 400 Validation Error
    pub fn validation_error(detail: impl Into<String>) -> Self {
        Self::new("validation-error", "Validation Error", 400, detail)
    }

    /// 400 Not Found（参照先の販売店・顧客・従業員が存在しない）
    pub fn reference_not_found(detail: impl Into<String>) -> Self {
        Self::new("not-found", "Not Found", 400, detail)
    }

    /// 500 Template Data Error
    ///
    /// テンプレート変数が欠けていて通知を組み立てられない。
    pub fn template_data_error(detail: impl Into<String>) -> Self {
        Self::new("template-data-error", "Template Data Error", 500, detail)
    }

    /// 500 Internal Server Error
    ///
    /// detail は固定値（内部情報を漏らさないため）。
    pub fn internal_error() -> Self {
        Self::new(
            "internal-error",
            "Internal Server Error",
            500,
            "内部エラーが発生しました",
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn reference_not_foundは400を返す() {
        let error = ErrorResponse::reference_not_found("Client not found");

        assert_eq!(
            error.error_type,
            "https://returnflow.example.com/errors/not-found"
        );
        assert_eq!(error.title, "Not Found");
        assert_eq!(error.status, 400);
        assert_eq!(error.detail, "Client not found");
    }

    #[test]
    fn template_data_errorは500を返す() {
        let error = ErrorResponse::template_data_error("Template Data (DATE) is empty!");

        assert_eq!(
            error.error_type,
            "https://returnflow.example.com/errors/template-data-error"
        );
        assert_eq!(error.status, 500);
    }

    #[test]
    fn internal_errorは固定のdetailを返す() {
        let error = ErrorResponse::internal_error();

        assert_eq!(error.status, 500);
        assert_eq!(error.detail, "内部エラーが発生しました");
    }

    #[test]
    fn jsonシリアライズでtypeフィールド名になる() {
        let error = ErrorResponse::validation_error("Empty notificationType");
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "type": "https://returnflow.example.com/errors/validation-error",
                "title": "Validation Error",
                "status": 400,
                "detail": "Empty notificationType"
            })
        );
    }

    #[test]
    fn 便利コンストラクタのstatusが正しい() {
        assert_eq!(ErrorResponse::bad_request("").status, 400);
        assert_eq!(ErrorResponse::validation_error("").status, 400);
        assert_eq!(ErrorResponse::reference_not_found("").status, 400);
        assert_eq!(ErrorResponse::template_data_error("").status, 500);
    }
}

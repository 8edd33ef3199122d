//! # 返品通知ユースケース
//!
//! 返品ステータス変更 1 件分の通知処理を行う。
//!
//! ```text
//! JSON ボディ → GoodsReturnRequest → InputValidator → TemplateDataBuilder → NotificationDispatcher
//!                                        │
//!                                        └─ resellerId が空なら早期終了
//! ```
//!
//! 各段階は前の段階が完了してから始まる。

mod coerce;
mod dispatch;
mod input;
mod request;
mod template_data;

pub use dispatch::NotificationDispatcher;
pub use input::{InputValidator, Outcome};
use returnflow_domain::operation_result::OperationResult;
pub use request::GoodsReturnRequest;
use serde_json::Value;
pub use template_data::TemplateDataBuilder;

use crate::error::CoreError;

/// 返品通知ユースケース
#[derive(Clone)]
pub struct GoodsReturnUseCase {
    validator:     InputValidator,
    template_data: TemplateDataBuilder,
    dispatcher:    NotificationDispatcher,
}

impl GoodsReturnUseCase {
    pub fn new(
        validator: InputValidator,
        template_data: TemplateDataBuilder,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            validator,
            template_data,
            dispatcher,
        }
    }

    /// 返品通知を処理する
    ///
    /// # エラー
    ///
    /// 入力不正・参照先なし・テンプレート変数の欠落。
    /// 送信の失敗はエラーにならず、結果のフラグにのみ反映される。
    #[tracing::instrument(skip_all, fields(reseller_id = tracing::field::Empty))]
    pub async fn execute(&self, body: &Value) -> Result<OperationResult, CoreError> {
        let request = GoodsReturnRequest::from_json(body);
        tracing::Span::current().record("reseller_id", request.reseller_id);

        let validated = match self.validator.validate(&request).await? {
            Outcome::EarlyResult(result) => return Ok(result),
            Outcome::Proceed(validated) => validated,
        };

        let payload = self.template_data.build(&request, &validated).await?;

        Ok(self.dispatcher.dispatch(&validated, &payload).await)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use returnflow_domain::{
        goods_return::StatusId,
        operation_result::ClientSmsResult,
        template_payload::TemplateField,
    };
    use serde_json::json;

    use super::*;
    use crate::test_utils::GoodsReturnTestBuilder;

    #[tokio::test]
    async fn 変更通知の全経路が成功する() {
        let setup = GoodsReturnTestBuilder::new().build();

        let result = setup
            .usecase
            .execute(&GoodsReturnTestBuilder::change_body())
            .await
            .unwrap();

        assert_eq!(
            result,
            OperationResult {
                notification_employee_by_email: true,
                notification_client_by_email:   true,
                notification_client_by_sms:     ClientSmsResult {
                    is_sent: true,
                    message: String::new(),
                },
            }
        );
    }

    #[tokio::test]
    async fn reseller_idが空なら何も送らない() {
        let setup = GoodsReturnTestBuilder::new().build();
        let mut body = GoodsReturnTestBuilder::change_body();
        body["resellerId"] = json!(null);

        let result = setup.usecase.execute(&body).await.unwrap();

        assert_eq!(result, OperationResult::early_exit("Empty resellerId"));
        assert_eq!(setup.mail_sender.attempt_count(), 0);
        assert!(setup.sms_sender.requests().is_empty());
    }

    #[tokio::test]
    async fn テンプレート変数が欠けていれば何も送らない() {
        let setup = GoodsReturnTestBuilder::new().build();
        let mut body = GoodsReturnTestBuilder::change_body();
        body["agreementNumber"] = json!("");

        let result = setup.usecase.execute(&body).await;

        assert!(matches!(
            result,
            Err(CoreError::TemplateData(msg)) if msg == "Template Data (AGREEMENT_NUMBER) is empty!"
        ));
        assert_eq!(setup.mail_sender.attempt_count(), 0);
        assert!(setup.sms_sender.requests().is_empty());
        assert!(setup.logs.logs().is_empty());
    }

    #[tokio::test]
    async fn 検証エラーでは何も送らない() {
        let setup = GoodsReturnTestBuilder::new().build();
        let mut body = GoodsReturnTestBuilder::change_body();
        body["creatorId"] = json!(404);

        let result = setup.usecase.execute(&body).await;

        assert!(matches!(result, Err(CoreError::NotFound(msg)) if msg == "Creator not found"));
        assert_eq!(setup.mail_sender.attempt_count(), 0);
    }

    #[tokio::test]
    async fn 同じ入力では同じ結果になる() {
        let setup = GoodsReturnTestBuilder::new().build();
        let body = json!({ "data": GoodsReturnTestBuilder::change_body() });

        let first = setup.usecase.execute(&body).await.unwrap();
        let second = setup.usecase.execute(&body).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(setup.sms_sender.requests().len(), 2);
    }

    #[tokio::test]
    async fn 新規通知でも変更後ステータスが0なら顧客に通知する() {
        let setup = GoodsReturnTestBuilder::new().build();
        let mut body = GoodsReturnTestBuilder::new_body();
        body["differences"] = json!({ "to": 0 });

        let result = setup.usecase.execute(&body).await.unwrap();

        assert!(result.notification_client_by_email);
        assert!(result.notification_client_by_sms.is_sent);
        let requests = setup.sms_sender.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].differences_to, Some(StatusId::from(0)));
    }

    #[tokio::test]
    async fn 変更前ステータスが0でも差分テキストを組み立てる() {
        let setup = GoodsReturnTestBuilder::new().build();
        let mut body = GoodsReturnTestBuilder::change_body();
        body["differences"] = json!({ "from": 0, "to": 4 });

        let result = setup.usecase.execute(&body).await.unwrap();

        assert!(result.notification_employee_by_email);
        let requests = setup.sms_sender.requests();
        assert_eq!(
            requests[0]
                .template_data
                .get(TemplateField::Differences)
                .map(ToString::to_string)
                .as_deref(),
            Some("ステータスが  から 返金済み に変更されました")
        );
    }

    #[tokio::test]
    async fn 負のreseller_idは販売店が見つからないエラーになる() {
        let setup = GoodsReturnTestBuilder::new().build();
        let mut body = GoodsReturnTestBuilder::change_body();
        body["resellerId"] = json!(-1);

        let result = setup.usecase.execute(&body).await;

        assert!(matches!(result, Err(CoreError::NotFound(msg)) if msg == "Seller not found"));
        assert_eq!(setup.mail_sender.attempt_count(), 0);
    }
}

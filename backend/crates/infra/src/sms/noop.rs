//! Noop SMS 送信実装
//!
//! SMS を実際に送信せず、ログ出力のみ行う。常に送信成功として扱う。

use async_trait::async_trait;
use returnflow_domain::notification::{SmsReceipt, SmsRequest};

use super::SmsSender;

#[derive(Debug, Clone, Default)]
pub struct NoopSmsSender;

#[async_trait]
impl SmsSender for NoopSmsSender {
    async fn send(&self, request: &SmsRequest) -> SmsReceipt {
        tracing::info!(
            reseller_id = %request.reseller_id,
            client_id = %request.client_id,
            event = %request.event,
            "Noop: SMS 送信をスキップ"
        );
        SmsReceipt::sent()
    }
}

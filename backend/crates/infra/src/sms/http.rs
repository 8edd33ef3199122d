//! HTTP SMS 送信実装
//!
//! 通知マネージャの SMS ゲートウェイに送信依頼を JSON で POST する。
//!
//! ゲートウェイは `{"sent": bool, "error": string | null}` を返す。
//! 2xx 以外の応答、通信エラー、応答の解釈失敗は送信失敗として扱う。

use std::time::Duration;

use async_trait::async_trait;
use returnflow_domain::notification::{SmsReceipt, SmsRequest};

use super::SmsSender;
use crate::error::InfraError;

/// HTTP SMS 送信
#[derive(Debug, Clone)]
pub struct HttpSmsSender {
    client:   reqwest::Client,
    endpoint: String,
}

impl HttpSmsSender {
    /// タイムアウト付きの HTTP クライアントで送信者を作成する
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, InfraError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl SmsSender for HttpSmsSender {
    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(reseller_id = %request.reseller_id, client_id = %request.client_id)
    )]
    async fn send(&self, request: &SmsRequest) -> SmsReceipt {
        let response = match self.client.post(&self.endpoint).json(request).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "SMS ゲートウェイへの送信に失敗");
                return SmsReceipt::failed(format!("SMS gateway request failed: {e}"));
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "SMS ゲートウェイがエラーを返した");
            return SmsReceipt::failed(format!("SMS gateway returned {status}"));
        }

        match response.json::<SmsReceipt>().await {
            Ok(receipt) => receipt,
            Err(e) => {
                tracing::warn!(error = %e, "SMS ゲートウェイの応答を解釈できない");
                SmsReceipt::failed(format!("SMS gateway response is invalid: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpSmsSender>();
    }

    #[test]
    fn タイムアウトを指定して作成できる() {
        let sender = HttpSmsSender::new("http://localhost:9/sms", Duration::from_secs(3));
        assert!(sender.is_ok());
    }
}

//! # SMS 送信
//!
//! 顧客への SMS 送信を担当するインフラストラクチャモジュール。
//!
//! SMS の文面組み立てと配信は外部の通知マネージャ（SMS ゲートウェイ）が行う。
//! このモジュールは送信依頼を渡し、結果を [`SmsReceipt`] として受け取るだけ。
//!
//! 送信の失敗はエラーとして返さず、`SmsReceipt` の `sent` / `error` に載せる。

mod http;
mod noop;

use async_trait::async_trait;
pub use http::HttpSmsSender;
pub use noop::NoopSmsSender;
use returnflow_domain::notification::{SmsReceipt, SmsRequest};

/// SMS 送信トレイト
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// SMS 送信を依頼する
    async fn send(&self, request: &SmsRequest) -> SmsReceipt;
}

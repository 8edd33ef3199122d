//! # 通知
//!
//! メール・SMS 通知に関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`NotificationEvent`] | 通知イベント種別 | 送信メッセージに付与するイベントタグ |
//! | [`EmailMessage`] | メールメッセージ | 送信元・宛先・件名・本文 |
//! | [`MailEnvelope`] | 送信コンテキスト | 販売店・顧客・イベントなど、メッセージ外の付帯情報 |
//! | [`SmsRequest`] | SMS 送信依頼 | SMS ゲートウェイ（通知マネージャ）への依頼内容 |
//! | [`SmsReceipt`] | SMS 送信結果 | 成否とエラー文字列。両者は独立して設定されうる |
//! | [`DeliveryStatus`] | 送信結果 | 通知ログに記録する送信試行の成否 |
//!
//! ## 設計方針
//!
//! - **fire-and-forget**: 通知送信の失敗は返品処理そのものを失敗させない
//! - **テンプレート分離**: 通知イベントとメッセージ生成は分離（TemplateRenderer はサービス側）

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use thiserror::Error;

use crate::{
    contractor::{ClientId, SellerId},
    goods_return::StatusId,
    template_payload::TemplatePayload,
};

define_uuid_id! {
    /// 通知ログ ID（一意識別子）
    ///
    /// notification_logs テーブルの主キー。UUID v7 を使用。
    pub struct NotificationLogId;
}

/// 通知テンプレート名
///
/// 販売店ごとに内容が登録されるテンプレートのキー。
pub mod template_name {
    /// 新規ポジション追加の差分テキスト
    pub const NEW_POSITION_ADDED: &str = "NewPositionAdded";
    /// ステータス変更の差分テキスト（`FROM` / `TO` を置換）
    pub const POSITION_STATUS_HAS_CHANGED: &str = "PositionStatusHasChanged";
    /// 従業員向けメール件名
    pub const EMPLOYEE_EMAIL_SUBJECT: &str = "complaintEmployeeEmailSubject";
    /// 従業員向けメール本文
    pub const EMPLOYEE_EMAIL_BODY: &str = "complaintEmployeeEmailBody";
    /// 顧客向けメール件名
    pub const CLIENT_EMAIL_SUBJECT: &str = "complaintClientEmailSubject";
    /// 顧客向けメール本文
    pub const CLIENT_EMAIL_BODY: &str = "complaintClientEmailBody";
}

/// 返品通知の受信を許可する権限キー
pub const GOODS_RETURN_PERMISSION: &str = "tsGoodsReturn";

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),
}

/// 通知イベント種別
///
/// 送信メッセージと notification_logs テーブルの `event_type` カラムに付与される。
/// snake_case でシリアライズされる。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationEvent {
    /// 返品ステータス変更
    ChangeReturnStatus,
}

/// 送信チャネル
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeliveryChannel {
    Email,
    Sms,
}

/// 通知の受信者区分
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RecipientKind {
    /// 社内スタッフ
    Employee,
    /// 顧客
    Client,
}

/// 送信試行の結果（notification_logs テーブルの `status` カラム）
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeliveryStatus {
    Sent,
    Failed,
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。NotificationSender に渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信元メールアドレス（販売店ごとの設定値）
    pub from:    String,
    /// 送信先メールアドレス
    pub to:      String,
    /// 件名
    pub subject: String,
    /// 本文（プレーンテキスト）
    pub body:    String,
}

/// メール送信時の付帯情報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MailEnvelope {
    pub reseller_id:    SellerId,
    /// 顧客宛ての場合のみ設定
    pub client_id:      Option<ClientId>,
    pub event:          NotificationEvent,
    /// 顧客宛ての場合の変更後ステータス
    pub differences_to: Option<StatusId>,
}

impl MailEnvelope {
    /// 従業員宛てメールの付帯情報
    pub fn for_employees(reseller_id: SellerId, event: NotificationEvent) -> Self {
        Self {
            reseller_id,
            client_id: None,
            event,
            differences_to: None,
        }
    }

    /// 顧客宛てメールの付帯情報
    pub fn for_client(
        reseller_id: SellerId,
        client_id: ClientId,
        event: NotificationEvent,
        differences_to: Option<StatusId>,
    ) -> Self {
        Self {
            reseller_id,
            client_id: Some(client_id),
            event,
            differences_to,
        }
    }
}

/// SMS 送信依頼
///
/// SMS ゲートウェイにそのまま JSON で渡す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsRequest {
    pub reseller_id:    SellerId,
    pub client_id:      ClientId,
    pub event:          NotificationEvent,
    pub differences_to: Option<StatusId>,
    pub template_data:  TemplatePayload,
}

/// SMS 送信結果
///
/// 送信成功（`sent`）とエラー文字列（`error`）は独立しており、
/// 成功かつ警告ありのような組み合わせもありうる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsReceipt {
    pub sent:  bool,
    pub error: Option<String>,
}

impl SmsReceipt {
    pub fn sent() -> Self {
        Self {
            sent:  true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            sent:  false,
            error: Some(error.into()),
        }
    }

    /// 空でないエラー文字列を返す
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

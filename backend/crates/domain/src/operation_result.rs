//! # 通知処理結果
//!
//! 返品通知処理 1 回分の結果。送信経路ごとの成否を保持する。
//!
//! JSON 形状は既存クライアントとの互換のため固定:
//!
//! ```json
//! {
//!   "notificationEmployeeByEmail": false,
//!   "notificationClientByEmail": false,
//!   "notificationClientBySms": { "isSent": false, "message": "" }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// 顧客向け SMS の送信結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSmsResult {
    /// 送信に成功したか
    pub is_sent: bool,
    /// 早期終了の理由、または SMS 送信側が返したエラー
    pub message: String,
}

/// 通知処理結果
///
/// 1 回の呼び出しの間だけ使われる可変のアキュムレータ。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult {
    /// 従業員へ 1 通以上メールを送信できたか
    pub notification_employee_by_email: bool,
    /// 顧客へメールを送信できたか
    pub notification_client_by_email:   bool,
    /// 顧客への SMS 送信結果
    pub notification_client_by_sms:     ClientSmsResult,
}

impl OperationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// 後続処理を行わずに返す結果を作成する
    ///
    /// 理由は SMS 結果のメッセージ欄に格納する。
    pub fn early_exit(message: impl Into<String>) -> Self {
        Self {
            notification_client_by_sms: ClientSmsResult {
                is_sent: false,
                message: message.into(),
            },
            ..Self::default()
        }
    }
}

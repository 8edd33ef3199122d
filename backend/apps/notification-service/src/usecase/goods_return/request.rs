//! # 返品通知リクエスト
//!
//! 型付けされていない JSON ボディを一度だけ読み、型変換済みのフィールドにする。
//! 以降の処理は生の JSON を参照しない。
//!
//! ボディはペイロードそのもの、または `{"data": {...}}` で包んだ形のどちらでも受け付ける。

use serde_json::Value;

use super::coerce;

/// 型変換済みの返品通知リクエスト
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoodsReturnRequest {
    pub reseller_id:        i64,
    pub notification_type:  i64,
    pub client_id:          i64,
    pub creator_id:         i64,
    pub expert_id:          i64,
    pub complaint_id:       i64,
    pub complaint_number:   String,
    pub consumption_id:     i64,
    pub consumption_number: String,
    pub agreement_number:   String,
    pub date:               String,
    /// `differences.from` があれば変換済みの値
    pub differences_from:   Option<i64>,
    /// `differences.to` があれば変換済みの値
    pub differences_to:     Option<i64>,
}

impl GoodsReturnRequest {
    /// JSON ボディから組み立てる
    ///
    /// オブジェクトでないボディは空のペイロードとして扱う。
    pub fn from_json(body: &Value) -> Self {
        let payload = match body.get("data") {
            Some(data) if data.is_object() => data,
            _ => body,
        };
        let field = |key: &str| payload.get(key);
        let differences = field("differences");

        Self {
            reseller_id:        coerce::int(field("resellerId")),
            notification_type:  coerce::int(field("notificationType")),
            client_id:          coerce::int(field("clientId")),
            creator_id:         coerce::int(field("creatorId")),
            expert_id:          coerce::int(field("expertId")),
            complaint_id:       coerce::int(field("complaintId")),
            complaint_number:   coerce::text(field("complaintNumber")),
            consumption_id:     coerce::int(field("consumptionId")),
            consumption_number: coerce::text(field("consumptionNumber")),
            agreement_number:   coerce::text(field("agreementNumber")),
            date:               coerce::text(field("date")),
            differences_from:   coerce::optional_int(differences, "from"),
            differences_to:     coerce::optional_int(differences, "to"),
        }
    }
}

//! # 返品ステータス変更
//!
//! 「返品ステータス変更」イベントの検証済みリクエストを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`GoodsReturnNotification`] | 返品通知リクエスト | 検証済みで不変。1 回の処理呼び出しが所有する |
//! | [`NotificationType`] | 通知種別 | 新規（チケット作成）または変更（ステータス変更） |
//! | [`Differences`] | 差分 | 変更前後のステータスの組 |
//! | [`StatusId`] | ステータス ID | 返品ポジションのステータス |
//!
//! ## 不変条件
//!
//! - `reseller_id` は 1 以上
//! - `notification_type` は `New` または `Change`
//! - `client.seller_id() == reseller_id` かつ顧客種別が `Customer`
//!
//! 不変条件はコンストラクタで検証するため、この型が存在する時点で成立している。

use serde::{Deserialize, Serialize};

use crate::{
    DomainError,
    contractor::{Client, Employee, Seller, SellerId},
};

/// 返品ポジションのステータス ID
///
/// リクエストで渡された値を検査せずに保持する。0 以下でも差分として扱い、
/// 該当するステータスが無ければ名前は空になる。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[display("{_0}")]
#[serde(transparent)]
pub struct StatusId(i64);

impl StatusId {
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// 通知種別
///
/// 外部 API では整数（1 = 新規、2 = 変更）で受け取る。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum NotificationType {
    /// 新規: 返品チケットに新しいポジションが追加された
    New,
    /// 変更: ポジションのステータスが変わった
    Change,
}

impl TryFrom<i64> for NotificationType {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::New),
            2 => Ok(Self::Change),
            0 => Err(DomainError::Validation("Empty notificationType".to_string())),
            _ => Err(DomainError::Validation(
                "Unknown notificationType".to_string(),
            )),
        }
    }
}

/// 変更前後のステータス
///
/// リクエストに含まれなかった側だけが `None`。含まれていれば 0 でも `Some`。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Differences {
    pub from: Option<StatusId>,
    pub to:   Option<StatusId>,
}

impl Differences {
    /// 変更前後の両方が揃っている場合に返す
    pub fn both(&self) -> Option<(StatusId, StatusId)> {
        self.from.zip(self.to)
    }
}

/// 検証済みの返品通知リクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoodsReturnNotification {
    notification_type: NotificationType,
    reseller:          Seller,
    client:            Client,
    creator:           Employee,
    expert:            Employee,
    differences:       Differences,
}

impl GoodsReturnNotification {
    /// 解決済みのエンティティから検証済みリクエストを組み立てる
    ///
    /// # エラー
    ///
    /// 顧客が販売店の顧客でない場合は `DomainError::NotFound { entity_type: "Client" }`
    pub fn new(
        notification_type: NotificationType,
        reseller: Seller,
        client: Client,
        creator: Employee,
        expert: Employee,
        differences: Differences,
    ) -> Result<Self, DomainError> {
        if !client.is_customer_of(reseller.id()) {
            return Err(DomainError::NotFound {
                entity_type: "Client",
            });
        }

        Ok(Self {
            notification_type,
            reseller,
            client,
            creator,
            expert,
            differences,
        })
    }

    pub fn reseller_id(&self) -> SellerId {
        self.reseller.id()
    }

    pub fn notification_type(&self) -> NotificationType {
        self.notification_type
    }

    pub fn reseller(&self) -> &Seller {
        &self.reseller
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn creator(&self) -> &Employee {
        &self.creator
    }

    pub fn expert(&self) -> &Employee {
        &self.expert
    }

    pub fn differences(&self) -> Differences {
        self.differences
    }

    /// 顧客への通知が必要かどうか
    ///
    /// 種別が `Change` でなく、かつ変更後ステータスもない場合は顧客に通知しない。
    pub fn should_notify_client(&self) -> bool {
        self.notification_type == NotificationType::Change || self.differences.to.is_some()
    }
}

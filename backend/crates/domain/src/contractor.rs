//! # 取引先
//!
//! 販売店・顧客・従業員といった、返品チケットに登場する主体を定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`Seller`] | 販売店（リセラー） | 通知ルールやテンプレートのスコープとなるテナント |
//! | [`Client`] | 顧客 | 返品を申し出た取引先。種別が `Customer` のものだけが通知対象 |
//! | [`Employee`] | 従業員 | チケットの作成者（creator）と担当者（expert） |
//! | [`ContractorKind`] | 取引先種別 | 顧客かそれ以外かを判別するフラグ |
//!
//! ## 設計方針
//!
//! - **整数 ID の Newtype**: 外部システムで採番された ID を型で区別する
//! - **表示名の合成**: 氏名パーツを空白区切りで結合し、空の場合は呼び出し側でフォールバック

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

define_numeric_id! {
    /// 販売店 ID
    pub struct SellerId {
        label: "販売店 ID",
    }
}

define_numeric_id! {
    /// 顧客（取引先）ID
    pub struct ClientId {
        label: "顧客 ID",
    }
}

define_numeric_id! {
    /// 従業員 ID
    pub struct EmployeeId {
        label: "従業員 ID",
    }
}

/// 取引先種別
///
/// 永続化時は snake_case の文字列で格納する。
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
pub enum ContractorKind {
    /// 顧客
    Customer,
    /// 顧客以外（仕入先、代理店など）
    Other,
}

/// 氏名
///
/// 姓・名はどちらも未設定になりうる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub first_name: Option<String>,
    pub last_name:  Option<String>,
}

impl PersonName {
    pub fn new(first_name: Option<String>, last_name: Option<String>) -> Self {
        Self {
            first_name,
            last_name,
        }
    }

    /// 姓名を空白区切りで結合したフルネームを返す
    ///
    /// 空・空白のみのパーツは無視する。すべて空なら空文字列。
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// 販売店
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seller {
    id:   SellerId,
    name: String,
}

impl Seller {
    pub fn new(id: SellerId, name: String) -> Self {
        Self { id, name }
    }

    pub fn id(&self) -> SellerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// 顧客
///
/// 所属販売店（`seller_id`）と連絡先（メール・携帯番号）を持つ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    id:          ClientId,
    kind:        ContractorKind,
    seller_id:   SellerId,
    name:        String,
    person_name: PersonName,
    email:       Option<String>,
    mobile:      Option<String>,
}

impl Client {
    pub fn new(
        id: ClientId,
        kind: ContractorKind,
        seller_id: SellerId,
        name: String,
        person_name: PersonName,
        email: Option<String>,
        mobile: Option<String>,
    ) -> Self {
        Self {
            id,
            kind,
            seller_id,
            name,
            person_name,
            email,
            mobile,
        }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn kind(&self) -> ContractorKind {
        self.kind
    }

    pub fn seller_id(&self) -> SellerId {
        self.seller_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> String {
        self.person_name.full_name()
    }

    /// テンプレートに表示する顧客名
    ///
    /// フルネームが空なら `name` にフォールバックする。
    pub fn display_name(&self) -> String {
        let full_name = self.full_name();
        if full_name.is_empty() {
            self.name.clone()
        } else {
            full_name
        }
    }

    /// 空文字列は未設定として扱う
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// 空文字列は未設定として扱う
    pub fn mobile(&self) -> Option<&str> {
        self.mobile.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// 指定した販売店に属する顧客かどうか
    pub fn is_customer_of(&self, seller_id: SellerId) -> bool {
        self.kind == ContractorKind::Customer && self.seller_id == seller_id
    }
}

/// 従業員
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    id:          EmployeeId,
    person_name: PersonName,
}

impl Employee {
    pub fn new(id: EmployeeId, person_name: PersonName) -> Self {
        Self { id, person_name }
    }

    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn full_name(&self) -> String {
        self.person_name.full_name()
    }
}

//! # テンプレート変数
//!
//! 通知テンプレートに差し込む変数の集合（テンプレートペイロード）を定義する。
//!
//! ## 設計方針
//!
//! - **全フィールド必須**: 1 つでも空のフィールドがあれば生成に失敗する。
//!   生成に成功したペイロードは常に全フィールドが非空
//! - **空の定義**: 整数の 0 と空文字列を「空」とみなす
//! - **検査順序**: [`TemplateField`] の宣言順に検査し、最初に見つかった空フィールドを返す

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::DomainError;

/// テンプレート変数名
///
/// テンプレート内のプレースホルダ名（`COMPLAINT_ID` など）と一致する。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateField {
    ComplaintId,
    ComplaintNumber,
    CreatorId,
    CreatorName,
    ExpertId,
    ExpertName,
    ClientId,
    ClientName,
    ConsumptionId,
    ConsumptionNumber,
    AgreementNumber,
    Date,
    Differences,
}

/// テンプレート変数の値
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateValue {
    Int(i64),
    Text(String),
}

impl TemplateValue {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Int(value) => *value == 0,
            Self::Text(value) => value.is_empty(),
        }
    }
}

impl std::fmt::Display for TemplateValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for TemplateValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<String> for TemplateValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// テンプレートペイロード
///
/// 全フィールドが非空であることが保証される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TemplatePayload(BTreeMap<TemplateField, TemplateValue>);

impl TemplatePayload {
    /// フィールドの組からペイロードを作成する
    ///
    /// # エラー
    ///
    /// 宣言順で最初に見つかった空（または欠落）フィールドについて
    /// `DomainError::EmptyTemplateField` を返す。
    pub fn new(
        entries: impl IntoIterator<Item = (TemplateField, TemplateValue)>,
    ) -> Result<Self, DomainError> {
        let values: BTreeMap<_, _> = entries.into_iter().collect();

        if let Some(field) = TemplateField::iter()
            .find(|field| values.get(field).is_none_or(TemplateValue::is_empty))
        {
            return Err(DomainError::EmptyTemplateField(field));
        }

        Ok(Self(values))
    }

    pub fn get(&self, field: TemplateField) -> Option<&TemplateValue> {
        self.0.get(&field)
    }

    /// 宣言順にフィールドを走査する
    pub fn iter(&self) -> impl Iterator<Item = (TemplateField, &TemplateValue)> {
        self.0.iter().map(|(field, value)| (*field, value))
    }

    /// テンプレート置換用の `(変数名, 文字列値)` の組に変換する
    pub fn variables(&self) -> Vec<(&'static str, String)> {
        self.iter()
            .map(|(field, value)| (field.into(), value.to_string()))
            .collect()
    }
}

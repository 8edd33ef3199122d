/// UUID v7 ベースの ID 型を定義する宣言型マクロ
///
/// 以下のボイラープレートを一括生成する:
/// - Newtype 構造体（`Uuid` をラップ）
/// - `derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)`
/// - `new()`: UUID v7 を生成
/// - `from_uuid()`: 既存 UUID から復元
/// - `as_uuid()`: 内部 UUID への参照
/// - `Default` impl（`new()` に委譲）
///
/// # 使用例
///
/// ```rust
/// use returnflow_domain::notification::NotificationLogId;
/// use uuid::Uuid;
///
/// let id = NotificationLogId::new();
/// let restored = NotificationLogId::from_uuid(*id.as_uuid());
/// assert_eq!(id, restored);
/// ```
macro_rules! define_uuid_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[display("{_0}")]
        $vis struct $Name(uuid::Uuid);

        impl $Name {
            /// 新しい ID を生成する（UUID v7）
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7())
            }

            /// 既存の UUID から ID を作成する
            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// 内部の UUID 参照を取得する
            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl Default for $Name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

/// 正の整数（i64）をラップする ID 型を定義する宣言型マクロ
///
/// 販売店・取引先・従業員・ステータスなど、外部システムで採番済みの
/// 整数 ID を型で区別するために使う。
///
/// 以下を一括生成する:
/// - Newtype 構造体（`i64` をラップ）
/// - `derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)`
/// - `new()`: 1 以上であることを検証して生成
/// - `as_i64()`: 内部値の取得
/// - `TryFrom<i64>`（`new()` に委譲）
///
/// # 使用例
///
/// ```rust
/// use returnflow_domain::contractor::SellerId;
///
/// let id = SellerId::new(42).unwrap();
/// assert_eq!(id.as_i64(), 42);
/// assert!(SellerId::new(0).is_err());
/// ```
macro_rules! define_numeric_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident {
            label: $label:expr $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[display("{_0}")]
        #[serde(try_from = "i64", into = "i64")]
        $vis struct $Name(i64);

        impl $Name {
            /// 1 以上の値から ID を作成する
            pub fn new(value: i64) -> Result<Self, $crate::DomainError> {
                if value <= 0 {
                    return Err($crate::DomainError::Validation(format!(
                        "{}は 1 以上である必要があります",
                        $label
                    )));
                }
                Ok(Self(value))
            }

            /// 内部の i64 値を取得する
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $Name {
            type Error = $crate::DomainError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$Name> for i64 {
            fn from(id: $Name) -> Self {
                id.0
            }
        }
    };
}

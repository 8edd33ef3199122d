//! # Notification Service 設定
//!
//! 環境変数からサーバー・メール送信・SMS 送信の設定を読み込む。
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `NOTIFY_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `NOTIFY_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `NOTIFICATION_BACKEND` | No | `smtp` / `ses` / `noop`（デフォルト: `noop`） |
//! | `SMTP_HOST` | No | SMTP ホスト（デフォルト: `localhost`） |
//! | `SMTP_PORT` | No | SMTP ポート（デフォルト: `1025`） |
//! | `SMS_BACKEND` | No | `http` / `noop`（デフォルト: `noop`） |
//! | `SMS_GATEWAY_URL` | `SMS_BACKEND=http` の場合 | SMS ゲートウェイの送信 URL |
//! | `SMS_GATEWAY_TIMEOUT_SECS` | No | SMS ゲートウェイのタイムアウト秒（デフォルト: `10`） |

use std::{collections::HashMap, time::Duration};

use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    #[error("{name} の値が不正です: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Notification Service の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host:         String,
    pub port:         u16,
    pub database_url: String,
    pub notification: NotificationConfig,
    pub sms:          SmsConfig,
}

/// メール送信バックエンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationConfig {
    /// SMTP サーバー経由（開発環境では Mailpit）
    Smtp { host: String, port: u16 },
    /// Amazon SES v2（認証情報は AWS SDK の標準チェーンから取得）
    Ses,
    /// 送信しない（ログ出力のみ）
    Noop,
}

/// SMS 送信バックエンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmsConfig {
    /// 通知マネージャの HTTP ゲートウェイ
    Http { url: String, timeout: Duration },
    /// 送信しない（ログ出力のみ）
    Noop,
}

impl ServiceConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&std::env::vars().collect())
    }

    /// 変数の組から設定を読み込む
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &str| vars.get(name).map(String::as_str).filter(|v| !v.is_empty());

        Ok(Self {
            host:         get("NOTIFY_HOST").unwrap_or("0.0.0.0").to_string(),
            port:         parse("NOTIFY_PORT", get("NOTIFY_PORT").ok_or(ConfigError::Missing("NOTIFY_PORT"))?)?,
            database_url: get("DATABASE_URL")
                .ok_or(ConfigError::Missing("DATABASE_URL"))?
                .to_string(),
            notification: NotificationConfig::from_vars(&get)?,
            sms:          SmsConfig::from_vars(&get)?,
        })
    }
}

impl NotificationConfig {
    fn from_vars<'a>(get: &impl Fn(&str) -> Option<&'a str>) -> Result<Self, ConfigError> {
        match get("NOTIFICATION_BACKEND").unwrap_or("noop") {
            "smtp" => Ok(Self::Smtp {
                host: get("SMTP_HOST").unwrap_or("localhost").to_string(),
                port: parse("SMTP_PORT", get("SMTP_PORT").unwrap_or("1025"))?,
            }),
            "ses" => Ok(Self::Ses),
            "noop" => Ok(Self::Noop),
            other => Err(ConfigError::Invalid {
                name:  "NOTIFICATION_BACKEND",
                value: other.to_string(),
            }),
        }
    }
}

impl SmsConfig {
    fn from_vars<'a>(get: &impl Fn(&str) -> Option<&'a str>) -> Result<Self, ConfigError> {
        match get("SMS_BACKEND").unwrap_or("noop") {
            "http" => Ok(Self::Http {
                url:     get("SMS_GATEWAY_URL")
                    .ok_or(ConfigError::Missing("SMS_GATEWAY_URL"))?
                    .to_string(),
                timeout: Duration::from_secs(parse(
                    "SMS_GATEWAY_TIMEOUT_SECS",
                    get("SMS_GATEWAY_TIMEOUT_SECS").unwrap_or("10"),
                )?),
            }),
            "noop" => Ok(Self::Noop),
            other => Err(ConfigError::Invalid {
                name:  "SMS_BACKEND",
                value: other.to_string(),
            }),
        }
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

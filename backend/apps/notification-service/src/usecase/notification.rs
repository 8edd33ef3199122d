//! # 通知ユースケース
//!
//! 返品通知の送信に共通する部品。
//!
//! - [`template_renderer`] - 販売店ごとのテンプレートを tera で展開する
//! - [`delivery_log`] - 送信試行を通知ログに記録する

pub mod delivery_log;
pub mod template_renderer;

pub use delivery_log::DeliveryRecorder;
pub use template_renderer::TemplateRenderer;

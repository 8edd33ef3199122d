//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! - 各ハンドラはサブモジュールに配置し、ここで re-export する
//! - ハンドラは薄く保ち、ビジネスロジックはユースケースに委譲

pub mod goods_return;
pub mod health;

pub use goods_return::{GoodsReturnState, notify_goods_return};
pub use health::{ReadinessState, health_check, readiness_check};

//! # ユースケース層
//!
//! 返品ステータス変更通知のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリ・送信者を `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約
//!
//! ## モジュール構成
//!
//! - `goods_return`: 返品通知（検証 → テンプレートデータ → 送信）
//! - `notification`: テンプレート展開と送信記録

pub mod goods_return;
pub mod notification;

pub use goods_return::{GoodsReturnRequest, GoodsReturnUseCase};

//! テストユーティリティ
//!
//! ユースケース・ハンドラのテストで使う標準的なセットアップを提供する。

mod goods_return_test_builder;

pub use goods_return_test_builder::{GoodsReturnTestBuilder, GoodsReturnTestSetup};

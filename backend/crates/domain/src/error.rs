//! # ドメイン層エラー定義
//!
//! ビジネスルール違反やドメイン固有の例外状態を表現するエラー型。
//!
//! ## 設計方針
//!
//! - **型による分類**: エラーの種類を列挙型で明示し、パターンマッチで処理可能に
//! - **thiserror 活用**: `#[error(...)]` マクロでエラーメッセージを自動生成
//! - **HTTP ステータスへのマッピング**: API 層でステータスコードに変換可能
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 必須項目の欠落・不正値 |
//! | `NotFound` | 400 Bad Request | 参照先エンティティが存在しない、または関係チェックに失敗 |
//! | `EmptyTemplateField` | 500 Internal Server Error | テンプレート変数が空のまま |
//!
//! メッセージは呼び出し元へそのまま返すため、英語の固定文言を使う。
//!
//! ## 使用例
//!
//! ```rust
//! use returnflow_domain::DomainError;
//!
//! let error = DomainError::NotFound {
//!     entity_type: "Seller",
//! };
//! assert_eq!(error.to_string(), "Seller not found");
//! ```

use thiserror::Error;

use crate::template_payload::TemplateField;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、適切な HTTP レスポンスに変換する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値がビジネスルールに違反している場合に使用する。
    ///
    /// # 例
    ///
    /// - `notificationType` が未指定
    /// - ID が 0 以下
    #[error("{0}")]
    Validation(String),

    /// エンティティが見つからない
    ///
    /// 存在しない場合に加え、取引先の種別や所属販売店が一致しない場合にも使う。
    #[error("{entity_type} not found")]
    NotFound {
        /// エンティティの種類（"Seller", "Client", "Creator", "Expert"）
        entity_type: &'static str,
    },

    /// テンプレート変数が空
    ///
    /// 最初に見つかった空のフィールド名を保持する。
    #[error("Template Data ({0}) is empty!")]
    EmptyTemplateField(TemplateField),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn not_foundのメッセージにエンティティ種別が含まれる() {
        let error = DomainError::NotFound {
            entity_type: "Client",
        };
        assert_eq!(error.to_string(), "Client not found");
    }

    #[test]
    fn empty_template_fieldのメッセージにフィールド名が含まれる() {
        let error = DomainError::EmptyTemplateField(TemplateField::AgreementNumber);
        assert_eq!(error.to_string(), "Template Data (AGREEMENT_NUMBER) is empty!");
    }

    #[test]
    fn validationはメッセージをそのまま出力する() {
        let error = DomainError::Validation("Empty notificationType".to_string());
        assert_eq!(error.to_string(), "Empty notificationType");
    }
}

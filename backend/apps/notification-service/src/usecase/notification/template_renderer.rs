//! # テンプレートレンダラー
//!
//! 販売店ごとに登録されたテンプレート本文を取得し、変数を差し込む。
//!
//! - 変数はプレースホルダ名で参照する（例: `{{ COMPLAINT_NUMBER }}`）
//! - 変数なしで呼び出した場合は本文をそのまま返す
//! - HTML エスケープは行わない（本文はプレーンテキスト）

use std::sync::Arc;

use returnflow_domain::{contractor::SellerId, notification::NotificationError};
use returnflow_infra::repository::TemplateRepository;
use tera::{Context, Tera};

/// テンプレートレンダラー
#[derive(Clone)]
pub struct TemplateRenderer {
    templates: Arc<dyn TemplateRepository>,
}

impl TemplateRenderer {
    pub fn new(templates: Arc<dyn TemplateRepository>) -> Self {
        Self { templates }
    }

    /// テンプレートを展開する
    ///
    /// # エラー
    ///
    /// テンプレートが未登録、取得失敗、または構文・変数の不整合で
    /// 展開できない場合は `NotificationError::TemplateFailed`。
    pub async fn render(
        &self,
        name: &str,
        variables: Option<&[(&str, String)]>,
        seller_id: SellerId,
    ) -> Result<String, NotificationError> {
        let content = self
            .templates
            .find_content(name, seller_id)
            .await
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?
            .ok_or_else(|| {
                NotificationError::TemplateFailed(format!(
                    "テンプレートが登録されていません: {name} (seller_id={seller_id})"
                ))
            })?;

        let Some(variables) = variables else {
            return Ok(content);
        };

        let mut context = Context::new();
        for (key, value) in variables {
            context.insert(*key, value);
        }

        Tera::one_off(&content, &context, false)
            .map_err(|e| NotificationError::TemplateFailed(format!("{name}: {e}")))
    }
}

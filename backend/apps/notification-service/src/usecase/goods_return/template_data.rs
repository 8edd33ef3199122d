//! # テンプレートデータの組み立て
//!
//! 通知テンプレートに差し込む 13 個の変数を組み立てる。
//!
//! ID・番号・日付はリクエストの値をそのまま使い、氏名だけは解決済みの
//! エンティティから取る。どれか 1 つでも空なら通知は一切行わない。

use std::sync::Arc;

use returnflow_domain::{
    goods_return::{GoodsReturnNotification, NotificationType, StatusId},
    notification::template_name,
    template_payload::{TemplateField, TemplatePayload},
};
use returnflow_infra::repository::StatusRepository;
use returnflow_shared::event_log::error::{category, kind};

use super::GoodsReturnRequest;
use crate::{error::CoreError, usecase::notification::TemplateRenderer};

/// テンプレートデータビルダー
#[derive(Clone)]
pub struct TemplateDataBuilder {
    statuses: Arc<dyn StatusRepository>,
    renderer: TemplateRenderer,
}

impl TemplateDataBuilder {
    pub fn new(statuses: Arc<dyn StatusRepository>, renderer: TemplateRenderer) -> Self {
        Self { statuses, renderer }
    }

    /// テンプレートデータを組み立てる
    ///
    /// # エラー
    ///
    /// 空のフィールドがあれば `CoreError::TemplateData`（`Template Data (<FIELD>) is empty!`）。
    pub async fn build(
        &self,
        request: &GoodsReturnRequest,
        validated: &GoodsReturnNotification,
    ) -> Result<TemplatePayload, CoreError> {
        let differences = self.differences_text(validated).await?;

        let payload = TemplatePayload::new([
            (TemplateField::ComplaintId, request.complaint_id.into()),
            (
                TemplateField::ComplaintNumber,
                request.complaint_number.as_str().into(),
            ),
            (TemplateField::CreatorId, request.creator_id.into()),
            (TemplateField::CreatorName, validated.creator().full_name().into()),
            (TemplateField::ExpertId, request.expert_id.into()),
            (TemplateField::ExpertName, validated.expert().full_name().into()),
            (TemplateField::ClientId, request.client_id.into()),
            (TemplateField::ClientName, validated.client().display_name().into()),
            (TemplateField::ConsumptionId, request.consumption_id.into()),
            (
                TemplateField::ConsumptionNumber,
                request.consumption_number.as_str().into(),
            ),
            (
                TemplateField::AgreementNumber,
                request.agreement_number.as_str().into(),
            ),
            (TemplateField::Date, request.date.as_str().into()),
            (TemplateField::Differences, differences.into()),
        ])?;

        Ok(payload)
    }

    /// 差分テキストを組み立てる
    ///
    /// テンプレートを展開できない場合は空文字列（結果として DIFFERENCES が空のエラーになる）。
    async fn differences_text(
        &self,
        validated: &GoodsReturnNotification,
    ) -> Result<String, CoreError> {
        let seller_id = validated.reseller_id();

        let rendered = match validated.notification_type() {
            NotificationType::New => {
                self.renderer
                    .render(template_name::NEW_POSITION_ADDED, None, seller_id)
                    .await
            }
            NotificationType::Change => {
                let Some((from, to)) = validated.differences().both() else {
                    return Ok(String::new());
                };
                let variables = [
                    ("FROM", self.status_name(from).await?),
                    ("TO", self.status_name(to).await?),
                ];
                self.renderer
                    .render(
                        template_name::POSITION_STATUS_HAS_CHANGED,
                        Some(variables.as_slice()),
                        seller_id,
                    )
                    .await
            }
        };

        Ok(rendered.unwrap_or_else(|e| {
            tracing::warn!(
                error.category = category::INFRASTRUCTURE,
                error.kind = kind::TEMPLATE,
                %seller_id,
                error = %e,
                "差分テキストのテンプレートを展開できない"
            );
            String::new()
        }))
    }

    /// ステータス名（未登録なら空文字列）
    async fn status_name(&self, id: StatusId) -> Result<String, CoreError> {
        Ok(self.statuses.find_name(id).await?.unwrap_or_default())
    }
}

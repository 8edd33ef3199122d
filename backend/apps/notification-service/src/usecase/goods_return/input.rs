//! # 入力検証
//!
//! リクエストの必須項目を検査し、販売店・顧客・従業員を解決して
//! 検証済みの [`GoodsReturnNotification`] を組み立てる。
//!
//! 検査順序は固定で、最初に失敗した項目のエラーを返す:
//!
//! 1. `resellerId` が空（0 に変換される値）→ 早期終了（エラーではない）
//! 2. `notificationType` が空・未知 → `Validation`
//! 3. 販売店 → 顧客 → 作成者 → 担当者の順に解決 → `NotFound`
//!    （負の ID は存在しない参照として扱う）

use std::sync::Arc;

use returnflow_domain::{
    DomainError,
    contractor::{Client, ClientId, Employee, EmployeeId, Seller, SellerId},
    goods_return::{Differences, GoodsReturnNotification, NotificationType, StatusId},
    operation_result::OperationResult,
};
use returnflow_infra::repository::ContractorRepository;
use returnflow_shared::{event_log::event, log_business_event};

use super::GoodsReturnRequest;
use crate::error::CoreError;

/// 検証結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 後続処理を行わずにこの結果を返す
    EarlyResult(OperationResult),
    /// 検証済みリクエストで処理を続行する
    Proceed(GoodsReturnNotification),
}

/// 入力検証
#[derive(Clone)]
pub struct InputValidator {
    contractors: Arc<dyn ContractorRepository>,
}

impl InputValidator {
    pub fn new(contractors: Arc<dyn ContractorRepository>) -> Self {
        Self { contractors }
    }

    /// リクエストを検証する
    pub async fn validate(&self, request: &GoodsReturnRequest) -> Result<Outcome, CoreError> {
        let reseller_id = request.reseller_id;
        if reseller_id == 0 {
            tracing::info!("resellerId が空のため通知しない");
            return Ok(Outcome::EarlyResult(OperationResult::early_exit(
                "Empty resellerId",
            )));
        }

        match self.resolve(request).await {
            Ok(validated) => {
                log_business_event!(
                    event.category = event::category::GOODS_RETURN,
                    event.action = event::action::GOODS_RETURN_VALIDATED,
                    event.reseller_id = reseller_id,
                    event.entity_type = event::entity_type::GOODS_RETURN,
                    event.entity_id = request.complaint_id,
                    event.result = event::result::SUCCESS,
                    reseller_name = validated.reseller().name(),
                    notification_type = %validated.notification_type(),
                    "返品通知リクエストを受理"
                );
                Ok(Outcome::Proceed(validated))
            }
            Err(e) => {
                log_business_event!(
                    event.category = event::category::GOODS_RETURN,
                    event.action = event::action::GOODS_RETURN_REJECTED,
                    event.reseller_id = reseller_id,
                    event.entity_type = event::entity_type::GOODS_RETURN,
                    event.entity_id = request.complaint_id,
                    event.result = event::result::FAILURE,
                    error = %e,
                    "返品通知リクエストを拒否"
                );
                Err(e)
            }
        }
    }

    async fn resolve(
        &self,
        request: &GoodsReturnRequest,
    ) -> Result<GoodsReturnNotification, CoreError> {
        let notification_type = NotificationType::try_from(request.notification_type)?;

        let reseller = self
            .find_seller(request.reseller_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Seller",
            })?;
        let reseller_id = reseller.id();

        let client = self
            .find_client(request.client_id)
            .await?
            .filter(|client| client.is_customer_of(reseller_id))
            .ok_or(DomainError::NotFound {
                entity_type: "Client",
            })?;

        let creator = self
            .find_employee(request.creator_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Creator",
            })?;

        let expert = self
            .find_employee(request.expert_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Expert",
            })?;

        let differences = Differences {
            from: request.differences_from.map(StatusId::from),
            to:   request.differences_to.map(StatusId::from),
        };

        Ok(GoodsReturnNotification::new(
            notification_type,
            reseller,
            client,
            creator,
            expert,
            differences,
        )?)
    }

    async fn find_seller(&self, id: i64) -> Result<Option<Seller>, CoreError> {
        let Ok(id) = SellerId::new(id) else {
            return Ok(None);
        };
        Ok(self.contractors.find_seller(id).await?)
    }

    async fn find_client(&self, id: i64) -> Result<Option<Client>, CoreError> {
        let Ok(id) = ClientId::new(id) else {
            return Ok(None);
        };
        Ok(self.contractors.find_client(id).await?)
    }

    async fn find_employee(&self, id: i64) -> Result<Option<Employee>, CoreError> {
        let Ok(id) = EmployeeId::new(id) else {
            return Ok(None);
        };
        Ok(self.contractors.find_employee(id).await?)
    }
}

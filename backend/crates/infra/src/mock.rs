//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリのリポジトリと送信者。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! returnflow-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! 送信者モックは呼び出しを記録し、テストから送信内容と回数を検証できる。

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use returnflow_domain::{
    contractor::{Client, ClientId, Employee, EmployeeId, Seller, SellerId},
    goods_return::StatusId,
    notification::{EmailMessage, MailEnvelope, NotificationError, SmsReceipt, SmsRequest},
};

use crate::{
    error::InfraError,
    notification::NotificationSender,
    repository::{
        ContractorRepository,
        NotificationLog,
        NotificationLogRepository,
        ResellerSettingsRepository,
        StatusRepository,
        TemplateRepository,
    },
    sms::SmsSender,
};

// ===== MockContractorRepository =====

#[derive(Clone, Default)]
pub struct MockContractorRepository {
    sellers:   Arc<Mutex<HashMap<SellerId, Seller>>>,
    clients:   Arc<Mutex<HashMap<ClientId, Client>>>,
    employees: Arc<Mutex<HashMap<EmployeeId, Employee>>>,
}

impl MockContractorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_seller(&self, seller: Seller) {
        self.sellers.lock().unwrap().insert(seller.id(), seller);
    }

    pub fn add_client(&self, client: Client) {
        self.clients.lock().unwrap().insert(client.id(), client);
    }

    pub fn add_employee(&self, employee: Employee) {
        self.employees.lock().unwrap().insert(employee.id(), employee);
    }
}

#[async_trait]
impl ContractorRepository for MockContractorRepository {
    async fn find_seller(&self, id: SellerId) -> Result<Option<Seller>, InfraError> {
        Ok(self.sellers.lock().unwrap().get(&id).cloned())
    }

    async fn find_client(&self, id: ClientId) -> Result<Option<Client>, InfraError> {
        Ok(self.clients.lock().unwrap().get(&id).cloned())
    }

    async fn find_employee(&self, id: EmployeeId) -> Result<Option<Employee>, InfraError> {
        Ok(self.employees.lock().unwrap().get(&id).cloned())
    }
}

// ===== MockStatusRepository =====

#[derive(Clone, Default)]
pub struct MockStatusRepository {
    names: Arc<Mutex<HashMap<StatusId, String>>>,
}

impl MockStatusRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_status(&self, id: StatusId, name: impl Into<String>) {
        self.names.lock().unwrap().insert(id, name.into());
    }
}

#[async_trait]
impl StatusRepository for MockStatusRepository {
    async fn find_name(&self, id: StatusId) -> Result<Option<String>, InfraError> {
        Ok(self.names.lock().unwrap().get(&id).cloned())
    }
}

// ===== MockResellerSettingsRepository =====

#[derive(Clone, Default)]
pub struct MockResellerSettingsRepository {
    sender_emails:    Arc<Mutex<HashMap<SellerId, String>>>,
    permitted_emails: Arc<Mutex<HashMap<(SellerId, String), Vec<String>>>>,
}

impl MockResellerSettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_sender_email(&self, seller_id: SellerId, email: impl Into<String>) {
        self.sender_emails
            .lock()
            .unwrap()
            .insert(seller_id, email.into());
    }

    pub fn set_permitted_emails(&self, seller_id: SellerId, permission: &str, emails: &[&str]) {
        self.permitted_emails.lock().unwrap().insert(
            (seller_id, permission.to_string()),
            emails.iter().map(|e| e.to_string()).collect(),
        );
    }
}

#[async_trait]
impl ResellerSettingsRepository for MockResellerSettingsRepository {
    async fn find_sender_email(&self, seller_id: SellerId) -> Result<Option<String>, InfraError> {
        Ok(self
            .sender_emails
            .lock()
            .unwrap()
            .get(&seller_id)
            .filter(|e| !e.is_empty())
            .cloned())
    }

    async fn find_permitted_emails(
        &self,
        seller_id: SellerId,
        permission: &str,
    ) -> Result<Vec<String>, InfraError> {
        Ok(self
            .permitted_emails
            .lock()
            .unwrap()
            .get(&(seller_id, permission.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

// ===== MockTemplateRepository =====

#[derive(Clone, Default)]
pub struct MockTemplateRepository {
    contents: Arc<Mutex<HashMap<(SellerId, String), String>>>,
}

impl MockTemplateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_template(&self, seller_id: SellerId, name: &str, content: impl Into<String>) {
        self.contents
            .lock()
            .unwrap()
            .insert((seller_id, name.to_string()), content.into());
    }
}

#[async_trait]
impl TemplateRepository for MockTemplateRepository {
    async fn find_content(
        &self,
        name: &str,
        seller_id: SellerId,
    ) -> Result<Option<String>, InfraError> {
        Ok(self
            .contents
            .lock()
            .unwrap()
            .get(&(seller_id, name.to_string()))
            .cloned())
    }
}

// ===== MockNotificationLogRepository =====

#[derive(Clone, Default)]
pub struct MockNotificationLogRepository {
    logs: Arc<Mutex<Vec<NotificationLog>>>,
}

impl MockNotificationLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logs(&self) -> Vec<NotificationLog> {
        self.logs.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationLogRepository for MockNotificationLogRepository {
    async fn insert(&self, log: &NotificationLog) -> Result<(), InfraError> {
        self.logs.lock().unwrap().push(log.clone());
        Ok(())
    }
}

// ===== MockNotificationSender =====

/// 送信したメールを記録するモック
///
/// [`fail_for`](Self::fail_for) で登録した宛先への送信は失敗する。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent:          Arc<Mutex<Vec<(EmailMessage, MailEnvelope)>>>,
    failing_to:    Arc<Mutex<HashSet<String>>>,
    attempt_count: Arc<Mutex<usize>>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_for(&self, to: &str) {
        self.failing_to.lock().unwrap().insert(to.to_string());
    }

    /// 送信に成功したメール
    pub fn sent_emails(&self) -> Vec<(EmailMessage, MailEnvelope)> {
        self.sent.lock().unwrap().clone()
    }

    /// 失敗を含む送信呼び出し回数
    pub fn attempt_count(&self) -> usize {
        *self.attempt_count.lock().unwrap()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(
        &self,
        email: &EmailMessage,
        envelope: &MailEnvelope,
    ) -> Result<(), NotificationError> {
        *self.attempt_count.lock().unwrap() += 1;

        if self.failing_to.lock().unwrap().contains(&email.to) {
            return Err(NotificationError::SendFailed(format!(
                "mock failure: {}",
                email.to
            )));
        }

        self.sent
            .lock()
            .unwrap()
            .push((email.clone(), *envelope));
        Ok(())
    }
}

// ===== MockSmsSender =====

/// SMS 送信依頼を記録し、設定した結果を返すモック
#[derive(Clone)]
pub struct MockSmsSender {
    receipt:  Arc<Mutex<SmsReceipt>>,
    requests: Arc<Mutex<Vec<SmsRequest>>>,
}

impl Default for MockSmsSender {
    fn default() -> Self {
        Self {
            receipt:  Arc::new(Mutex::new(SmsReceipt::sent())),
            requests: Arc::default(),
        }
    }
}

impl MockSmsSender {
    /// 常に送信成功を返す
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(&self, receipt: SmsReceipt) {
        *self.receipt.lock().unwrap() = receipt;
    }

    pub fn requests(&self) -> Vec<SmsRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmsSender for MockSmsSender {
    async fn send(&self, request: &SmsRequest) -> SmsReceipt {
        self.requests.lock().unwrap().push(request.clone());
        self.receipt.lock().unwrap().clone()
    }
}

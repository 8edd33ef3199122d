//! 返品通知テストビルダー
//!
//! テストコードの重複を削減するためのビルダーパターン実装。
//! 標準的な販売店・顧客・従業員・テンプレートを登録したモックのセットを提供する。

use std::sync::Arc;

use returnflow_domain::{
    contractor::{
        Client,
        ClientId,
        ContractorKind,
        Employee,
        EmployeeId,
        PersonName,
        Seller,
        SellerId,
    },
    goods_return::{GoodsReturnNotification, StatusId},
    notification::{GOODS_RETURN_PERMISSION, template_name},
    template_payload::TemplatePayload,
};
use returnflow_infra::mock::{
    MockContractorRepository,
    MockNotificationLogRepository,
    MockNotificationSender,
    MockResellerSettingsRepository,
    MockSmsSender,
    MockStatusRepository,
    MockTemplateRepository,
};
use serde_json::{Value, json};

use crate::usecase::{
    goods_return::{
        GoodsReturnRequest,
        GoodsReturnUseCase,
        InputValidator,
        NotificationDispatcher,
        Outcome,
        TemplateDataBuilder,
    },
    notification::{DeliveryRecorder, TemplateRenderer},
};

/// 返品通知テストのセットアップデータ
///
/// GoodsReturnTestBuilder が生成する SUT と Mock のセット。
pub struct GoodsReturnTestSetup {
    pub usecase:       GoodsReturnUseCase,
    pub validator:     InputValidator,
    pub template_data: TemplateDataBuilder,
    pub dispatcher:    NotificationDispatcher,
    pub contractors:   MockContractorRepository,
    pub settings:      MockResellerSettingsRepository,
    pub templates:     MockTemplateRepository,
    pub logs:          MockNotificationLogRepository,
    pub mail_sender:   MockNotificationSender,
    pub sms_sender:    MockSmsSender,
}

impl GoodsReturnTestSetup {
    /// ボディを検証してテンプレートデータまで組み立てる
    ///
    /// 送信処理だけをテストするときに使う。
    pub async fn prepare(&self, body: &Value) -> (GoodsReturnNotification, TemplatePayload) {
        let request = GoodsReturnRequest::from_json(body);
        let validated = match self.validator.validate(&request).await {
            Ok(Outcome::Proceed(validated)) => validated,
            other => panic!("検証済みリクエストを期待したが {other:?}"),
        };
        match self.template_data.build(&request, &validated).await {
            Ok(payload) => (validated, payload),
            Err(e) => panic!("テンプレートデータの組み立てに失敗: {e}"),
        }
    }
}

/// 返品通知テストビルダー
///
/// # 使用例
///
/// ```ignore
/// use returnflow_notification_service::test_utils::GoodsReturnTestBuilder;
///
/// #[tokio::test]
/// async fn test_example() {
///     let setup = GoodsReturnTestBuilder::new().without_sender_email().build();
///
///     let result = setup
///         .usecase
///         .execute(&GoodsReturnTestBuilder::change_body())
///         .await
///         .unwrap();
///
///     assert!(!result.notification_employee_by_email);
/// }
/// ```
pub struct GoodsReturnTestBuilder {
    sender_email:           bool,
    permitted_emails:       bool,
    differences_templates:  bool,
    client_email_templates: bool,
}

impl Default for GoodsReturnTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GoodsReturnTestBuilder {
    pub const SELLER_ID: i64 = 1;
    pub const OTHER_SELLER_ID: i64 = 2;
    pub const CLIENT_ID: i64 = 5;
    /// 別の販売店に属する顧客
    pub const OTHER_SELLER_CLIENT_ID: i64 = 6;
    /// 顧客種別でない取引先
    pub const NON_CUSTOMER_CLIENT_ID: i64 = 7;
    /// 氏名・連絡先を持たない顧客
    pub const NAMELESS_CLIENT_ID: i64 = 8;
    pub const CREATOR_ID: i64 = 2;
    pub const EXPERT_ID: i64 = 3;

    pub const SENDER_EMAIL: &str = "noreply@reseller.example.com";
    pub const PERMITTED_EMAILS: [&str; 2] = [
        "manager@reseller.example.com",
        "support@reseller.example.com",
    ];
    pub const CLIENT_EMAIL: &str = "jiro@client.example.com";
    pub const CLIENT_MOBILE: &str = "+81-90-1234-5678";

    /// 全データを登録する設定でビルダーを作成
    pub fn new() -> Self {
        Self {
            sender_email:           true,
            permitted_emails:       true,
            differences_templates:  true,
            client_email_templates: true,
        }
    }

    /// 販売店の送信元アドレスを登録しない
    pub fn without_sender_email(mut self) -> Self {
        self.sender_email = false;
        self
    }

    /// 返品通知の権限を持つ従業員を登録しない
    pub fn without_permitted_emails(mut self) -> Self {
        self.permitted_emails = false;
        self
    }

    /// 差分テキストのテンプレートを登録しない
    pub fn without_differences_templates(mut self) -> Self {
        self.differences_templates = false;
        self
    }

    /// 顧客向けメールのテンプレートを登録しない
    pub fn without_client_email_templates(mut self) -> Self {
        self.client_email_templates = false;
        self
    }

    pub fn seller_id() -> SellerId {
        seller_id(Self::SELLER_ID)
    }

    pub fn client_id() -> ClientId {
        client_id(Self::CLIENT_ID)
    }

    /// 変更通知（ステータス 1 → 4）のリクエストボディ
    pub fn change_body() -> Value {
        json!({
            "resellerId": Self::SELLER_ID,
            "notificationType": 2,
            "clientId": Self::CLIENT_ID,
            "creatorId": Self::CREATOR_ID,
            "expertId": Self::EXPERT_ID,
            "complaintId": 10,
            "complaintNumber": "C-10",
            "consumptionId": 7,
            "consumptionNumber": "CN-7",
            "agreementNumber": "AG-1",
            "date": "2024-05-01",
            "differences": { "from": 1, "to": 4 }
        })
    }

    /// 新規通知（differences なし）のリクエストボディ
    pub fn new_body() -> Value {
        let mut body = Self::change_body();
        body["notificationType"] = json!(1);
        if let Some(map) = body.as_object_mut() {
            map.remove("differences");
        }
        body
    }

    /// モックにデータを登録し、SUT を組み立てる
    pub fn build(self) -> GoodsReturnTestSetup {
        let contractors = self.contractors();
        let statuses = MockStatusRepository::new();
        statuses.add_status(status_id(1), "受付");
        statuses.add_status(status_id(4), "返金済み");
        let settings = self.settings();
        let templates = self.templates();
        let logs = MockNotificationLogRepository::new();
        let mail_sender = MockNotificationSender::new();
        let sms_sender = MockSmsSender::new();

        let renderer = TemplateRenderer::new(Arc::new(templates.clone()));
        let validator = InputValidator::new(Arc::new(contractors.clone()));
        let template_data = TemplateDataBuilder::new(Arc::new(statuses), renderer.clone());
        let dispatcher = NotificationDispatcher::new(
            Arc::new(settings.clone()),
            renderer,
            Arc::new(mail_sender.clone()),
            Arc::new(sms_sender.clone()),
            DeliveryRecorder::new(Arc::new(logs.clone())),
        );
        let usecase =
            GoodsReturnUseCase::new(validator.clone(), template_data.clone(), dispatcher.clone());

        GoodsReturnTestSetup {
            usecase,
            validator,
            template_data,
            dispatcher,
            contractors,
            settings,
            templates,
            logs,
            mail_sender,
            sms_sender,
        }
    }

    fn contractors(&self) -> MockContractorRepository {
        let contractors = MockContractorRepository::new();
        contractors.add_seller(Seller::new(Self::seller_id(), "Reseller One".to_string()));
        contractors.add_seller(Seller::new(
            seller_id(Self::OTHER_SELLER_ID),
            "Reseller Two".to_string(),
        ));

        contractors.add_client(Client::new(
            Self::client_id(),
            ContractorKind::Customer,
            Self::seller_id(),
            "Jiro Trading".to_string(),
            person_name("Jiro", "Client"),
            Some(Self::CLIENT_EMAIL.to_string()),
            Some(Self::CLIENT_MOBILE.to_string()),
        ));
        contractors.add_client(Client::new(
            client_id(Self::OTHER_SELLER_CLIENT_ID),
            ContractorKind::Customer,
            seller_id(Self::OTHER_SELLER_ID),
            "Other Seller Customer".to_string(),
            PersonName::default(),
            None,
            None,
        ));
        contractors.add_client(Client::new(
            client_id(Self::NON_CUSTOMER_CLIENT_ID),
            ContractorKind::Other,
            Self::seller_id(),
            "Supplier".to_string(),
            PersonName::default(),
            None,
            None,
        ));
        contractors.add_client(Client::new(
            client_id(Self::NAMELESS_CLIENT_ID),
            ContractorKind::Customer,
            Self::seller_id(),
            "Nameless Trading".to_string(),
            PersonName::default(),
            Some(String::new()),
            None,
        ));

        contractors.add_employee(Employee::new(
            employee_id(Self::CREATOR_ID),
            person_name("Taro", "Creator"),
        ));
        contractors.add_employee(Employee::new(
            employee_id(Self::EXPERT_ID),
            person_name("Hanako", "Expert"),
        ));
        contractors
    }

    fn settings(&self) -> MockResellerSettingsRepository {
        let settings = MockResellerSettingsRepository::new();
        if self.sender_email {
            settings.set_sender_email(Self::seller_id(), Self::SENDER_EMAIL);
        }
        if self.permitted_emails {
            settings.set_permitted_emails(
                Self::seller_id(),
                GOODS_RETURN_PERMISSION,
                &Self::PERMITTED_EMAILS,
            );
        }
        settings
    }

    fn templates(&self) -> MockTemplateRepository {
        let templates = MockTemplateRepository::new();
        let seller = Self::seller_id();

        if self.differences_templates {
            templates.add_template(
                seller,
                template_name::NEW_POSITION_ADDED,
                "新しいポジションが追加されました",
            );
            templates.add_template(
                seller,
                template_name::POSITION_STATUS_HAS_CHANGED,
                "ステータスが {{ FROM }} から {{ TO }} に変更されました",
            );
        }

        templates.add_template(
            seller,
            template_name::EMPLOYEE_EMAIL_SUBJECT,
            "返品 {{ COMPLAINT_NUMBER }} のお知らせ",
        );
        templates.add_template(
            seller,
            template_name::EMPLOYEE_EMAIL_BODY,
            "{{ CREATOR_NAME }} / {{ EXPERT_NAME }}: {{ DIFFERENCES }}",
        );

        if self.client_email_templates {
            templates.add_template(
                seller,
                template_name::CLIENT_EMAIL_SUBJECT,
                "返品 {{ COMPLAINT_NUMBER }} の状況",
            );
            templates.add_template(
                seller,
                template_name::CLIENT_EMAIL_BODY,
                "{{ CLIENT_NAME }} 様: {{ DIFFERENCES }}",
            );
        }
        templates
    }
}

fn person_name(first: &str, last: &str) -> PersonName {
    PersonName::new(Some(first.to_string()), Some(last.to_string()))
}

// 以下の ID はすべて正の定数から作るため失敗しない

fn seller_id(id: i64) -> SellerId {
    SellerId::new(id).unwrap_or_else(|e| panic!("{e}"))
}

fn client_id(id: i64) -> ClientId {
    ClientId::new(id).unwrap_or_else(|e| panic!("{e}"))
}

fn employee_id(id: i64) -> EmployeeId {
    EmployeeId::new(id).unwrap_or_else(|e| panic!("{e}"))
}

fn status_id(id: i64) -> StatusId {
    StatusId::from(id)
}

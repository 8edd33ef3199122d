//! # 通知の送信
//!
//! テンプレートデータを使って従業員と顧客へ通知を送る。
//!
//! - 従業員: 返品通知の権限を持つ全員へメール
//! - 顧客: 変更通知（または変更後ステータスあり）の場合のみ、メールと SMS を個別に試行
//!
//! 送信の失敗はエラーとして返さず、ログと結果フラグにのみ反映する。
//! 販売店の送信元アドレスは 1 回だけ取得し、両方の経路で共有する。

use std::sync::Arc;

use returnflow_domain::{
    goods_return::GoodsReturnNotification,
    notification::{
        DeliveryChannel,
        DeliveryStatus,
        EmailMessage,
        GOODS_RETURN_PERMISSION,
        MailEnvelope,
        NotificationError,
        NotificationEvent,
        RecipientKind,
        SmsRequest,
        template_name,
    },
    operation_result::{ClientSmsResult, OperationResult},
    template_payload::TemplatePayload,
};
use returnflow_infra::{
    notification::NotificationSender,
    repository::ResellerSettingsRepository,
    sms::SmsSender,
};
use returnflow_shared::event_log::error::{category, kind};

use crate::usecase::notification::{
    DeliveryRecorder,
    TemplateRenderer,
    delivery_log::{DeliveryAttempt, log_skipped},
};

const EVENT: NotificationEvent = NotificationEvent::ChangeReturnStatus;

/// 顧客向け経路の結果
#[derive(Debug, Default)]
struct ClientOutcome {
    by_email: bool,
    by_sms:   ClientSmsResult,
}

/// 通知ディスパッチャー
#[derive(Clone)]
pub struct NotificationDispatcher {
    settings:    Arc<dyn ResellerSettingsRepository>,
    renderer:    TemplateRenderer,
    mail_sender: Arc<dyn NotificationSender>,
    sms_sender:  Arc<dyn SmsSender>,
    recorder:    DeliveryRecorder,
}

impl NotificationDispatcher {
    pub fn new(
        settings: Arc<dyn ResellerSettingsRepository>,
        renderer: TemplateRenderer,
        mail_sender: Arc<dyn NotificationSender>,
        sms_sender: Arc<dyn SmsSender>,
        recorder: DeliveryRecorder,
    ) -> Self {
        Self {
            settings,
            renderer,
            mail_sender,
            sms_sender,
            recorder,
        }
    }

    /// 従業員と顧客へ通知し、結果を返す
    pub async fn dispatch(
        &self,
        validated: &GoodsReturnNotification,
        payload: &TemplatePayload,
    ) -> OperationResult {
        let sender = self.sender_email(validated).await;
        let sender = sender.as_deref();

        let (by_employee_email, client) = tokio::join!(
            self.notify_employees(validated, payload, sender),
            self.notify_client(validated, payload, sender),
        );

        OperationResult {
            notification_employee_by_email: by_employee_email,
            notification_client_by_email:   client.by_email,
            notification_client_by_sms:     client.by_sms,
        }
    }

    async fn sender_email(&self, validated: &GoodsReturnNotification) -> Option<String> {
        self.settings
            .find_sender_email(validated.reseller_id())
            .await
            .unwrap_or_else(|e| {
                tracing::error!(
                    error.category = category::INFRASTRUCTURE,
                    error.kind = kind::DATABASE,
                    error = %e,
                    "送信元アドレスの取得に失敗"
                );
                None
            })
    }

    /// 従業員へ通知する
    ///
    /// 1 通でも送信できれば `true`。
    async fn notify_employees(
        &self,
        validated: &GoodsReturnNotification,
        payload: &TemplatePayload,
        sender: Option<&str>,
    ) -> bool {
        let seller_id = validated.reseller_id();

        let Some(sender) = sender else {
            log_skipped(
                seller_id,
                DeliveryChannel::Email,
                RecipientKind::Employee,
                "sender email is not configured",
            );
            return false;
        };

        let recipients = self
            .settings
            .find_permitted_emails(seller_id, GOODS_RETURN_PERMISSION)
            .await
            .unwrap_or_else(|e| {
                tracing::error!(
                    error.category = category::INFRASTRUCTURE,
                    error.kind = kind::DATABASE,
                    error = %e,
                    "通知先従業員の取得に失敗"
                );
                Vec::new()
            });
        if recipients.is_empty() {
            log_skipped(
                seller_id,
                DeliveryChannel::Email,
                RecipientKind::Employee,
                "no permitted employees",
            );
            return false;
        }

        let (subject, body) = match self
            .render_email(
                template_name::EMPLOYEE_EMAIL_SUBJECT,
                template_name::EMPLOYEE_EMAIL_BODY,
                validated,
                payload,
            )
            .await
        {
            Ok(rendered) => rendered,
            Err(e) => {
                log_template_failure(&e, RecipientKind::Employee);
                return false;
            }
        };

        let envelope = MailEnvelope::for_employees(seller_id, EVENT);
        let mut any_sent = false;
        for to in recipients {
            let email = EmailMessage {
                from:    sender.to_string(),
                to,
                subject: subject.clone(),
                body:    body.clone(),
            };
            let sent = self.send_email(&email, &envelope, RecipientKind::Employee).await;
            any_sent |= sent;
        }
        any_sent
    }

    /// 顧客へ通知する
    async fn notify_client(
        &self,
        validated: &GoodsReturnNotification,
        payload: &TemplatePayload,
        sender: Option<&str>,
    ) -> ClientOutcome {
        if !validated.should_notify_client() {
            log_skipped(
                validated.reseller_id(),
                DeliveryChannel::Email,
                RecipientKind::Client,
                "new position without target status",
            );
            return ClientOutcome::default();
        }

        let (by_email, by_sms) = tokio::join!(
            self.notify_client_by_email(validated, payload, sender),
            self.notify_client_by_sms(validated, payload),
        );

        ClientOutcome { by_email, by_sms }
    }

    async fn notify_client_by_email(
        &self,
        validated: &GoodsReturnNotification,
        payload: &TemplatePayload,
        sender: Option<&str>,
    ) -> bool {
        let client = validated.client();
        let (Some(sender), Some(to)) = (sender, client.email()) else {
            log_skipped(
                validated.reseller_id(),
                DeliveryChannel::Email,
                RecipientKind::Client,
                "sender or client email is not configured",
            );
            return false;
        };

        let (subject, body) = match self
            .render_email(
                template_name::CLIENT_EMAIL_SUBJECT,
                template_name::CLIENT_EMAIL_BODY,
                validated,
                payload,
            )
            .await
        {
            Ok(rendered) => rendered,
            Err(e) => {
                log_template_failure(&e, RecipientKind::Client);
                return false;
            }
        };

        let email = EmailMessage {
            from: sender.to_string(),
            to: to.to_string(),
            subject,
            body,
        };
        let envelope = MailEnvelope::for_client(
            validated.reseller_id(),
            client.id(),
            EVENT,
            validated.differences().to,
        );
        self.send_email(&email, &envelope, RecipientKind::Client).await
    }

    async fn notify_client_by_sms(
        &self,
        validated: &GoodsReturnNotification,
        payload: &TemplatePayload,
    ) -> ClientSmsResult {
        let client = validated.client();
        let Some(mobile) = client.mobile() else {
            log_skipped(
                validated.reseller_id(),
                DeliveryChannel::Sms,
                RecipientKind::Client,
                "client mobile is not configured",
            );
            return ClientSmsResult::default();
        };

        let request = SmsRequest {
            reseller_id:    validated.reseller_id(),
            client_id:      client.id(),
            event:          EVENT,
            differences_to: validated.differences().to,
            template_data:  payload.clone(),
        };
        let receipt = self.sms_sender.send(&request).await;
        let message = receipt.error_message().unwrap_or_default().to_string();

        self.recorder
            .record(DeliveryAttempt {
                reseller_id:    validated.reseller_id(),
                client_id:      Some(client.id()),
                channel:        DeliveryChannel::Sms,
                recipient_kind: RecipientKind::Client,
                recipient:      mobile,
                subject:        None,
                status:         if receipt.sent {
                    DeliveryStatus::Sent
                } else {
                    DeliveryStatus::Failed
                },
                error_message:  receipt.error_message().map(str::to_string),
            })
            .await;

        ClientSmsResult {
            is_sent: receipt.sent,
            message,
        }
    }

    /// 件名と本文を展開する
    async fn render_email(
        &self,
        subject_template: &str,
        body_template: &str,
        validated: &GoodsReturnNotification,
        payload: &TemplatePayload,
    ) -> Result<(String, String), NotificationError> {
        let seller_id = validated.reseller_id();
        let variables = payload.variables();

        let subject = self
            .renderer
            .render(subject_template, Some(variables.as_slice()), seller_id)
            .await?;
        let body = self
            .renderer
            .render(body_template, Some(variables.as_slice()), seller_id)
            .await?;

        Ok((subject, body))
    }

    /// メールを 1 通送信して記録する
    async fn send_email(
        &self,
        email: &EmailMessage,
        envelope: &MailEnvelope,
        recipient_kind: RecipientKind,
    ) -> bool {
        let result = self.mail_sender.send_email(email, envelope).await;

        let (status, error_message) = match &result {
            Ok(()) => (DeliveryStatus::Sent, None),
            Err(e) => (DeliveryStatus::Failed, Some(e.to_string())),
        };
        self.recorder
            .record(DeliveryAttempt {
                reseller_id: envelope.reseller_id,
                client_id: envelope.client_id,
                channel: DeliveryChannel::Email,
                recipient_kind,
                recipient: &email.to,
                subject: Some(&email.subject),
                status,
                error_message,
            })
            .await;

        result.is_ok()
    }
}

fn log_template_failure(error: &NotificationError, recipient_kind: RecipientKind) {
    let recipient_kind: &str = recipient_kind.into();
    tracing::error!(
        error.category = category::INFRASTRUCTURE,
        error.kind = kind::TEMPLATE,
        error = %error,
        recipient = recipient_kind,
        "通知メールのテンプレートを展開できない"
    );
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use returnflow_domain::{
        goods_return::StatusId,
        notification::SmsReceipt,
        template_payload::TemplateField,
    };
    use serde_json::json;

    use super::*;
    use crate::test_utils::{GoodsReturnTestBuilder, GoodsReturnTestSetup};

    async fn dispatch(setup: &GoodsReturnTestSetup, body: serde_json::Value) -> OperationResult {
        let (validated, payload) = setup.prepare(&body).await;
        setup.dispatcher.dispatch(&validated, &payload).await
    }

    fn new_body_with_to() -> serde_json::Value {
        let mut body = GoodsReturnTestBuilder::new_body();
        body["differences"] = json!({ "to": 4 });
        body
    }

    #[tokio::test]
    async fn 変更通知では全経路に送信する() {
        let setup = GoodsReturnTestBuilder::new().build();

        let result = dispatch(&setup, GoodsReturnTestBuilder::change_body()).await;

        assert!(result.notification_employee_by_email);
        assert!(result.notification_client_by_email);
        assert_eq!(
            result.notification_client_by_sms,
            ClientSmsResult {
                is_sent: true,
                message: String::new(),
            }
        );
    }

    #[tokio::test]
    async fn 権限を持つ従業員それぞれに同じ内容のメールを送る() {
        let setup = GoodsReturnTestBuilder::new().build();

        dispatch(&setup, GoodsReturnTestBuilder::change_body()).await;

        let employee_emails: Vec<_> = setup
            .mail_sender
            .sent_emails()
            .into_iter()
            .filter(|(_, envelope)| envelope.client_id.is_none())
            .collect();
        let recipients: Vec<_> = employee_emails.iter().map(|(e, _)| e.to.as_str()).collect();
        assert_eq!(recipients, GoodsReturnTestBuilder::PERMITTED_EMAILS);
        for (email, envelope) in &employee_emails {
            assert_eq!(email.from, GoodsReturnTestBuilder::SENDER_EMAIL);
            assert_eq!(email.subject, "返品 C-10 のお知らせ");
            assert_eq!(envelope.event, NotificationEvent::ChangeReturnStatus);
            assert_eq!(envelope.differences_to, None);
        }
    }

    #[tokio::test]
    async fn 顧客へのメールは変更後ステータスを付帯情報に持つ() {
        let setup = GoodsReturnTestBuilder::new().build();

        dispatch(&setup, GoodsReturnTestBuilder::change_body()).await;

        let (email, envelope) = setup
            .mail_sender
            .sent_emails()
            .into_iter()
            .find(|(_, envelope)| envelope.client_id.is_some())
            .unwrap();
        assert_eq!(email.to, GoodsReturnTestBuilder::CLIENT_EMAIL);
        assert_eq!(email.from, GoodsReturnTestBuilder::SENDER_EMAIL);
        assert_eq!(
            email.body,
            "Jiro Client 様: ステータスが 受付 から 返金済み に変更されました"
        );
        assert_eq!(envelope.client_id, Some(GoodsReturnTestBuilder::client_id()));
        assert_eq!(envelope.differences_to, Some(StatusId::from(4)));
    }

    #[tokio::test]
    async fn smsにはテンプレートデータを渡す() {
        let setup = GoodsReturnTestBuilder::new().build();

        dispatch(&setup, GoodsReturnTestBuilder::change_body()).await;

        let requests = setup.sms_sender.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].reseller_id, GoodsReturnTestBuilder::seller_id());
        assert_eq!(requests[0].client_id, GoodsReturnTestBuilder::client_id());
        assert_eq!(requests[0].differences_to, Some(StatusId::from(4)));
        assert_eq!(
            requests[0]
                .template_data
                .get(TemplateField::ComplaintNumber)
                .map(ToString::to_string),
            Some("C-10".to_string())
        );
    }

    #[tokio::test]
    async fn 従業員の一部への送信失敗でもフラグは立つ() {
        let setup = GoodsReturnTestBuilder::new().build();
        setup
            .mail_sender
            .fail_for(GoodsReturnTestBuilder::PERMITTED_EMAILS[0]);

        let result = dispatch(&setup, GoodsReturnTestBuilder::new_body()).await;

        assert!(result.notification_employee_by_email);
        assert_eq!(setup.mail_sender.attempt_count(), 2);
    }

    #[tokio::test]
    async fn 従業員への送信がすべて失敗すればフラグは立たない() {
        let setup = GoodsReturnTestBuilder::new().build();
        for to in GoodsReturnTestBuilder::PERMITTED_EMAILS {
            setup.mail_sender.fail_for(to);
        }

        let result = dispatch(&setup, GoodsReturnTestBuilder::new_body()).await;

        assert!(!result.notification_employee_by_email);
        assert_eq!(setup.mail_sender.attempt_count(), 2);
    }

    #[tokio::test]
    async fn 送信元アドレスが無ければメールは送らずsmsだけ送る() {
        let setup = GoodsReturnTestBuilder::new().without_sender_email().build();

        let result = dispatch(&setup, GoodsReturnTestBuilder::change_body()).await;

        assert!(!result.notification_employee_by_email);
        assert!(!result.notification_client_by_email);
        assert!(result.notification_client_by_sms.is_sent);
        assert_eq!(setup.mail_sender.attempt_count(), 0);
    }

    #[tokio::test]
    async fn 権限を持つ従業員がいなければ従業員には送らない() {
        let setup = GoodsReturnTestBuilder::new().without_permitted_emails().build();

        let result = dispatch(&setup, GoodsReturnTestBuilder::change_body()).await;

        assert!(!result.notification_employee_by_email);
        assert!(result.notification_client_by_email);
        assert_eq!(setup.mail_sender.attempt_count(), 1);
    }

    #[tokio::test]
    async fn 変更後ステータスの無い新規通知では顧客に通知しない() {
        let setup = GoodsReturnTestBuilder::new().build();

        let result = dispatch(&setup, GoodsReturnTestBuilder::new_body()).await;

        assert!(result.notification_employee_by_email);
        assert!(!result.notification_client_by_email);
        assert_eq!(result.notification_client_by_sms, ClientSmsResult::default());
        assert!(setup.sms_sender.requests().is_empty());
        assert_eq!(setup.mail_sender.attempt_count(), 2);
    }

    #[tokio::test]
    async fn 変更後ステータスのある新規通知では顧客に通知する() {
        let setup = GoodsReturnTestBuilder::new().build();

        let result = dispatch(&setup, new_body_with_to()).await;

        assert!(result.notification_client_by_email);
        assert!(result.notification_client_by_sms.is_sent);
    }

    #[tokio::test]
    async fn sms送信側のエラーは成否と独立してメッセージに入る() {
        let setup = GoodsReturnTestBuilder::new().build();
        setup.sms_sender.respond_with(SmsReceipt {
            sent:  true,
            error: Some("partially delivered".to_string()),
        });

        let result = dispatch(&setup, GoodsReturnTestBuilder::change_body()).await;

        assert_eq!(
            result.notification_client_by_sms,
            ClientSmsResult {
                is_sent: true,
                message: "partially delivered".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn sms送信失敗はフラグとメッセージに反映される() {
        let setup = GoodsReturnTestBuilder::new().build();
        setup
            .sms_sender
            .respond_with(SmsReceipt::failed("gateway timeout"));

        let result = dispatch(&setup, GoodsReturnTestBuilder::change_body()).await;

        assert!(!result.notification_client_by_sms.is_sent);
        assert_eq!(result.notification_client_by_sms.message, "gateway timeout");
        assert!(result.notification_client_by_email);
    }

    #[tokio::test]
    async fn 連絡先の無い顧客にはメールもsmsも送らない() {
        let setup = GoodsReturnTestBuilder::new().build();
        let mut body = GoodsReturnTestBuilder::change_body();
        body["clientId"] = json!(GoodsReturnTestBuilder::NAMELESS_CLIENT_ID);

        let result = dispatch(&setup, body).await;

        assert!(result.notification_employee_by_email);
        assert!(!result.notification_client_by_email);
        assert_eq!(result.notification_client_by_sms, ClientSmsResult::default());
        assert!(setup.sms_sender.requests().is_empty());
    }

    #[tokio::test]
    async fn 顧客向けテンプレートが無ければメールは送らない() {
        let setup = GoodsReturnTestBuilder::new()
            .without_client_email_templates()
            .build();

        let result = dispatch(&setup, GoodsReturnTestBuilder::change_body()).await;

        assert!(!result.notification_client_by_email);
        assert!(result.notification_client_by_sms.is_sent);
        assert!(result.notification_employee_by_email);
    }

    #[tokio::test]
    async fn 送信試行はすべて通知ログに記録される() {
        let setup = GoodsReturnTestBuilder::new().build();
        setup
            .mail_sender
            .fail_for(GoodsReturnTestBuilder::PERMITTED_EMAILS[1]);

        dispatch(&setup, GoodsReturnTestBuilder::change_body()).await;

        let logs = setup.logs.logs();
        assert_eq!(logs.len(), 4);
        let failed: Vec<_> = logs
            .iter()
            .filter(|log| log.status == DeliveryStatus::Failed)
            .collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].recipient, GoodsReturnTestBuilder::PERMITTED_EMAILS[1]);
        assert!(
            logs.iter()
                .any(|log| log.channel == DeliveryChannel::Sms
                    && log.recipient == GoodsReturnTestBuilder::CLIENT_MOBILE)
        );
    }
}

//! # Notification Service サーバー
//!
//! 返品ステータス変更の通知を行う内部サービス。
//!
//! ## 役割
//!
//! - **入力検証**: 販売店・顧客・従業員を解決し、リクエストを検証する
//! - **テンプレート展開**: 販売店ごとのテンプレートに返品情報を差し込む
//! - **通知送信**: 従業員へのメール、顧客へのメール・SMS
//!
//! ## アクセス制御
//!
//! 内部ネットワークからのみアクセス可能とする。
//!
//! ## 環境変数
//!
//! [`config`](returnflow_notification_service::config) モジュールを参照。
//! ログ出力は `LOG_FORMAT`（`json` / `pretty`）と `RUST_LOG` で制御する。
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p returnflow-notification-service
//!
//! # 本番環境
//! NOTIFY_PORT=3100 DATABASE_URL=postgres://... NOTIFICATION_BACKEND=ses \
//!   SMS_BACKEND=http SMS_GATEWAY_URL=http://... \
//!   cargo run -p returnflow-notification-service --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use returnflow_infra::{
    db,
    notification::{
        NoopNotificationSender,
        NotificationSender,
        SesNotificationSender,
        SmtpNotificationSender,
    },
    repository::{
        PostgresContractorRepository,
        PostgresNotificationLogRepository,
        PostgresResellerSettingsRepository,
        PostgresStatusRepository,
        PostgresTemplateRepository,
    },
    sms::{HttpSmsSender, NoopSmsSender, SmsSender},
};
use returnflow_notification_service::{
    app_builder::build_router,
    config::{NotificationConfig, ServiceConfig, SmsConfig},
    handler::{GoodsReturnState, ReadinessState},
    usecase::{
        GoodsReturnUseCase,
        goods_return::{InputValidator, NotificationDispatcher, TemplateDataBuilder},
        notification::{DeliveryRecorder, TemplateRenderer},
    },
};
use returnflow_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Notification Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("notification-service");
    init_tracing(&tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "notification-service").entered();

    // 設定読み込み
    let config = ServiceConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Notification Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベース接続に失敗しました")?;
    db::run_migrations(&pool)
        .await
        .context("マイグレーションに失敗しました")?;
    tracing::info!("データベースに接続しました");

    // 送信者の初期化
    let mail_sender = build_mail_sender(&config.notification).await;
    let sms_sender = build_sms_sender(&config.sms)?;

    // 依存コンポーネントを初期化
    let renderer = TemplateRenderer::new(Arc::new(PostgresTemplateRepository::new(pool.clone())));
    let validator = InputValidator::new(Arc::new(PostgresContractorRepository::new(pool.clone())));
    let template_data = TemplateDataBuilder::new(
        Arc::new(PostgresStatusRepository::new(pool.clone())),
        renderer.clone(),
    );
    let dispatcher = NotificationDispatcher::new(
        Arc::new(PostgresResellerSettingsRepository::new(pool.clone())),
        renderer,
        mail_sender,
        sms_sender,
        DeliveryRecorder::new(Arc::new(PostgresNotificationLogRepository::new(
            pool.clone(),
        ))),
    );
    let goods_return_state = Arc::new(GoodsReturnState {
        usecase: GoodsReturnUseCase::new(validator, template_data, dispatcher),
    });
    let readiness_state = Arc::new(ReadinessState { pool });

    // ルーター構築
    let app = build_router(goods_return_state, readiness_state);

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("{addr} へのバインドに失敗しました"))?;
    tracing::info!("Notification Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await.context("サーバーエラー")?;

    Ok(())
}

/// メール送信バックエンドを選択する
async fn build_mail_sender(config: &NotificationConfig) -> Arc<dyn NotificationSender> {
    match config {
        NotificationConfig::Smtp { host, port } => {
            tracing::info!("メール送信: SMTP ({}:{})", host, port);
            Arc::new(SmtpNotificationSender::new(host, *port))
        }
        NotificationConfig::Ses => {
            tracing::info!("メール送信: Amazon SES");
            let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
            Arc::new(SesNotificationSender::new(aws_sdk_sesv2::Client::new(
                &aws_config,
            )))
        }
        NotificationConfig::Noop => {
            tracing::info!("メール送信: Noop（送信しない）");
            Arc::new(NoopNotificationSender)
        }
    }
}

/// SMS 送信バックエンドを選択する
fn build_sms_sender(config: &SmsConfig) -> anyhow::Result<Arc<dyn SmsSender>> {
    match config {
        SmsConfig::Http { url, timeout } => {
            tracing::info!("SMS 送信: HTTP ゲートウェイ ({})", url);
            let sender = HttpSmsSender::new(url.clone(), *timeout)
                .context("SMS ゲートウェイクライアントの初期化に失敗しました")?;
            Ok(Arc::new(sender))
        }
        SmsConfig::Noop => {
            tracing::info!("SMS 送信: Noop（送信しない）");
            Ok(Arc::new(NoopSmsSender))
        }
    }
}

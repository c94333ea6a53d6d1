use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use question_relay::application::ports::LlmClient;
use question_relay::application::services::{
    Completer, CompletionWorker, PromptTemplate, RelayService, RetentionSweeper,
    StreamProxyService,
};
use question_relay::infrastructure::llm::{DashScopeClient, MockLlmClient, SseProxyClient};
use question_relay::infrastructure::observability::{TracingConfig, init_tracing};
use question_relay::infrastructure::persistence::JobRepositoryFactory;
use question_relay::presentation::{AppState, Environment, ScaffoldConfig, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;

    init_tracing(
        TracingConfig::from_settings(
            environment.as_str(),
            &settings.logging.level,
            settings.logging.json,
        ),
        settings.server.port,
    );

    let scaffold_config = ScaffoldConfig::default();
    let job_repository = JobRepositoryFactory::create(&settings.storage)?;
    tracing::info!(provider = ?settings.storage.provider, "Job repository ready");

    let upstream_timeout = Duration::from_secs(settings.upstream.timeout_secs);
    let llm_client: Arc<dyn LlmClient> = if scaffold_config.enabled {
        tracing::warn!("Scaffold mode enabled: upstream completions are mocked");
        Arc::new(MockLlmClient::new(scaffold_config.mock_delay()))
    } else {
        if settings.upstream.api_key.is_empty() {
            tracing::warn!("APP_UPSTREAM__API_KEY is not set");
        }
        if settings.upstream.application_id.is_empty() {
            tracing::warn!("APP_UPSTREAM__APPLICATION_ID is not set");
        }
        Arc::new(DashScopeClient::new(
            settings.upstream.api_key.clone(),
            settings.upstream.application_id.clone(),
            settings.upstream.base_url.clone(),
            upstream_timeout,
        )?)
    };

    let (completion_sender, completion_receiver) =
        mpsc::channel(settings.relay.queue_capacity.max(1));

    let completer = Arc::new(Completer::new(
        llm_client,
        Arc::clone(&job_repository),
        PromptTemplate::new(settings.relay.instruction.clone()),
        settings.relay.messages.clone(),
        upstream_timeout,
    ));
    tokio::spawn(CompletionWorker::new(completion_receiver, completer).run());

    if settings.retention.enabled() {
        let sweeper = RetentionSweeper::new(
            Arc::clone(&job_repository),
            Duration::from_secs(settings.retention.ttl_secs),
            Duration::from_secs(settings.retention.sweep_interval_secs),
        );
        tokio::spawn(sweeper.run());
    } else {
        tracing::info!("Retention disabled: job records are kept indefinitely");
    }

    let relay_service = Arc::new(RelayService::new(
        job_repository,
        completion_sender,
        settings.relay.messages.clone(),
    ));

    if settings.proxy.target_endpoint.is_empty() {
        tracing::warn!("APP_PROXY__TARGET_ENDPOINT is not set; stream requests will fail");
    }
    if settings.proxy.api_key.is_empty() {
        tracing::warn!("APP_PROXY__API_KEY is not set");
    }
    let stream_proxy = Arc::new(StreamProxyService::new(Arc::new(SseProxyClient::new(
        settings.proxy.target_endpoint.clone(),
        settings.proxy.api_key.clone(),
        Duration::from_secs(settings.proxy.timeout_secs),
    )?)));

    let router = create_router(AppState {
        relay_service,
        stream_proxy,
    });

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

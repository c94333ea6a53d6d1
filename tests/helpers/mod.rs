use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::{Notify, mpsc, oneshot};

use question_relay::application::ports::{
    EventLineStream, EventStreamClient, JobRepository, LlmClient, LlmClientError,
    RepositoryError,
};
use question_relay::application::services::{
    Completer, CompletionWorker, PromptTemplate, RelayMessages, RelayService,
    StreamProxyService,
};
use question_relay::domain::{Job, JobId};
use question_relay::infrastructure::persistence::ObjectStoreJobRepository;
use question_relay::presentation::{AppState, create_router};

pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Answers only after `release` is called, so tests can observe the
/// pending window deterministically.
pub struct GatedLlmClient {
    gate: Arc<Notify>,
    answer: String,
}

impl GatedLlmClient {
    pub fn new(answer: &str) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        (
            Self {
                gate: Arc::clone(&gate),
                answer: answer.to_string(),
            },
            gate,
        )
    }
}

#[async_trait::async_trait]
impl LlmClient for GatedLlmClient {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmClientError> {
        self.gate.notified().await;
        Ok(self.answer.clone())
    }
}

/// Records every prompt and replies with a fixed outcome.
pub struct RecordingLlmClient {
    pub prompts: Mutex<Vec<String>>,
    outcome: fn() -> Result<String, LlmClientError>,
}

impl RecordingLlmClient {
    pub fn new(outcome: fn() -> Result<String, LlmClientError>) -> Self {
        Self {
            prompts: Mutex::new(vec![]),
            outcome,
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for RecordingLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        (self.outcome)()
    }
}

pub struct FailingJobRepository;

#[async_trait::async_trait]
impl JobRepository for FailingJobRepository {
    async fn get(&self, _id: &JobId) -> Result<Option<Job>, RepositoryError> {
        Err(RepositoryError::ConnectionFailed("store offline".to_string()))
    }

    async fn put(&self, _job: &Job) -> Result<(), RepositoryError> {
        Err(RepositoryError::ConnectionFailed("store offline".to_string()))
    }

    async fn delete(&self, _id: &JobId) -> Result<(), RepositoryError> {
        Err(RepositoryError::ConnectionFailed("store offline".to_string()))
    }

    async fn list(&self) -> Result<Vec<Job>, RepositoryError> {
        Err(RepositoryError::ConnectionFailed("store offline".to_string()))
    }
}

pub fn memory_repository() -> Arc<dyn JobRepository> {
    Arc::new(ObjectStoreJobRepository::in_memory())
}

pub fn completer(
    llm_client: Arc<dyn LlmClient>,
    job_repository: Arc<dyn JobRepository>,
) -> Completer {
    Completer::new(
        llm_client,
        job_repository,
        PromptTemplate::default(),
        RelayMessages::default(),
        TEST_TIMEOUT,
    )
}

/// Relay service wired to a running completion worker.
pub fn relay_service(
    llm_client: Arc<dyn LlmClient>,
    job_repository: Arc<dyn JobRepository>,
) -> Arc<RelayService> {
    let (sender, receiver) = mpsc::channel(16);
    let completer = Arc::new(completer(llm_client, Arc::clone(&job_repository)));
    tokio::spawn(CompletionWorker::new(receiver, completer).run());

    Arc::new(RelayService::new(
        job_repository,
        sender,
        RelayMessages::default(),
    ))
}

/// Event-stream upstream that refuses every connection.
pub struct OfflineEventStream;

#[async_trait::async_trait]
impl EventStreamClient for OfflineEventStream {
    async fn open(&self, _payload: &serde_json::Value) -> Result<EventLineStream, LlmClientError> {
        Err(LlmClientError::ApiRequestFailed("connection refused".to_string()))
    }
}

pub fn relay_app(
    llm_client: Arc<dyn LlmClient>,
    job_repository: Arc<dyn JobRepository>,
) -> axum::Router {
    app_with_stream(llm_client, job_repository, Arc::new(OfflineEventStream))
}

pub fn app_with_stream(
    llm_client: Arc<dyn LlmClient>,
    job_repository: Arc<dyn JobRepository>,
    stream_client: Arc<dyn EventStreamClient>,
) -> axum::Router {
    create_router(AppState {
        relay_service: relay_service(llm_client, job_repository),
        stream_proxy: Arc::new(StreamProxyService::new(stream_client)),
    })
}

pub async fn wait_for_completion(job_repository: &Arc<dyn JobRepository>, id: &JobId) -> Job {
    let deadline = tokio::time::Instant::now() + TEST_TIMEOUT;
    loop {
        if let Some(job) = job_repository.get(id).await.unwrap() {
            if job.is_complete() {
                return job;
            }
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "job {} did not complete in time",
            id
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Serves `router` on an ephemeral local port until the returned sender is
/// dropped. Returns the base url.
pub async fn serve(router: axum::Router) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (format!("http://{}", addr), shutdown_tx)
}

#[derive(Default)]
pub struct CapturedStreamRequest {
    pub authorization: Option<String>,
    pub accept: Option<String>,
    pub body: Option<serde_json::Value>,
}

/// Event-stream upstream that answers every POST with `chunks`, written one
/// by one, and records what it was sent.
pub async fn start_mock_sse_server(
    status: axum::http::StatusCode,
    chunks: Vec<&'static str>,
) -> (String, Arc<Mutex<CapturedStreamRequest>>, oneshot::Sender<()>) {
    use axum::http::{HeaderMap, header};
    use axum::response::IntoResponse;

    let captured = Arc::new(Mutex::new(CapturedStreamRequest::default()));
    let sink = Arc::clone(&captured);

    let router = axum::Router::new().route(
        "/sse",
        axum::routing::post(move |headers: HeaderMap, body: String| {
            let sink = Arc::clone(&sink);
            let chunks = chunks.clone();
            async move {
                {
                    let mut captured = sink.lock().unwrap();
                    let header_text = |name: header::HeaderName| {
                        headers
                            .get(name)
                            .and_then(|v| v.to_str().ok())
                            .map(String::from)
                    };
                    captured.authorization = header_text(header::AUTHORIZATION);
                    captured.accept = header_text(header::ACCEPT);
                    captured.body = serde_json::from_str(&body).ok();
                }

                let frames = futures::stream::iter(
                    chunks
                        .into_iter()
                        .map(Ok::<_, std::convert::Infallible>),
                );
                (
                    status,
                    [(header::CONTENT_TYPE, "text/event-stream")],
                    axum::body::Body::from_stream(frames),
                )
                    .into_response()
            }
        }),
    );

    let (base_url, shutdown) = serve(router).await;
    (format!("{}/sse", base_url), captured, shutdown)
}

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::Instrument;

use crate::application::ports::{JobRepository, LlmClient, LlmClientError, RepositoryError};
use crate::domain::Job;

use super::{PromptTemplate, RelayMessages};

pub struct CompletionRequest {
    pub job: Job,
    pub question: String,
}

/// Runs the upstream call for one job and writes the terminal record.
pub struct Completer {
    llm_client: Arc<dyn LlmClient>,
    job_repository: Arc<dyn JobRepository>,
    prompt: PromptTemplate,
    messages: RelayMessages,
    max_duration: Duration,
}

impl Completer {
    pub fn new(
        llm_client: Arc<dyn LlmClient>,
        job_repository: Arc<dyn JobRepository>,
        prompt: PromptTemplate,
        messages: RelayMessages,
        max_duration: Duration,
    ) -> Self {
        Self {
            llm_client,
            job_repository,
            prompt,
            messages,
            max_duration,
        }
    }

    /// Never fails on the upstream side: errors and timeouts become the
    /// apology text. Only the final write can fail.
    pub async fn complete(&self, job: Job, question: &str) -> Result<Job, CompletionError> {
        let prompt = self.prompt.build(question);

        let upstream = self.llm_client.complete(&prompt);
        let outcome = match tokio::time::timeout(self.max_duration, upstream).await {
            Ok(outcome) => outcome,
            Err(_) => Err(LlmClientError::ApiRequestFailed(format!(
                "no answer within {}s",
                self.max_duration.as_secs()
            ))),
        };

        let answer = self.answer_text(outcome);
        let job = job.complete(&answer);

        self.job_repository
            .put(&job)
            .await
            .map_err(CompletionError::Repository)?;

        Ok(job)
    }

    pub fn answer_text(&self, outcome: Result<String, LlmClientError>) -> String {
        match outcome {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    self.messages.empty_answer.clone()
                } else {
                    text.to_string()
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Upstream completion failed");
                self.messages.upstream_failure.clone()
            }
        }
    }
}

/// Receives freshly submitted jobs and completes each one on its own task,
/// detached from the request that created it.
pub struct CompletionWorker {
    receiver: mpsc::Receiver<CompletionRequest>,
    completer: Arc<Completer>,
}

impl CompletionWorker {
    pub fn new(receiver: mpsc::Receiver<CompletionRequest>, completer: Arc<Completer>) -> Self {
        Self {
            receiver,
            completer,
        }
    }

    pub async fn run(mut self) {
        tracing::info!("Completion worker started");
        while let Some(request) = self.receiver.recv().await {
            let completer = Arc::clone(&self.completer);
            let span = tracing::info_span!("completion_job", job_id = %request.job.id);
            tokio::spawn(
                async move {
                    match completer.complete(request.job, &request.question).await {
                        Ok(job) => tracing::info!(status = %job.status, "Job completed"),
                        Err(e) => tracing::error!(error = %e, "Failed to store completed job"),
                    }
                }
                .instrument(span),
            );
        }
        tracing::info!("Completion worker stopped: channel closed");
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("repository: {0}")]
    Repository(RepositoryError),
}

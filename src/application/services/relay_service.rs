use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::{Job, JobId, verify_marker};

use super::{CompletionRequest, RelayMessages};

/// The three-field reply every relay request produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayReply {
    pub question_id: String,
    pub answer: String,
    pub verify: String,
}

impl RelayReply {
    fn message(question_id: String, answer: String) -> Self {
        Self {
            question_id,
            answer,
            verify: String::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
    #[error("completion queue closed, job {0} left pending")]
    DispatchClosed(JobId),
}

/// Submit and Poll. Holds no job state of its own: everything a later
/// request needs goes through the repository.
pub struct RelayService {
    job_repository: Arc<dyn JobRepository>,
    completion_sender: mpsc::Sender<CompletionRequest>,
    messages: RelayMessages,
}

impl RelayService {
    pub fn new(
        job_repository: Arc<dyn JobRepository>,
        completion_sender: mpsc::Sender<CompletionRequest>,
        messages: RelayMessages,
    ) -> Self {
        Self {
            job_repository,
            completion_sender,
            messages,
        }
    }

    pub fn messages(&self) -> &RelayMessages {
        &self.messages
    }

    /// A non-blank id makes the request a poll, whatever else it carries.
    pub async fn handle(
        &self,
        question_id: &str,
        question: &str,
    ) -> Result<RelayReply, RelayError> {
        let question_id = question_id.trim();
        if !question_id.is_empty() {
            return self.poll(&JobId::from_raw(question_id)).await;
        }
        self.submit(question).await
    }

    #[tracing::instrument(skip(self, question))]
    pub async fn submit(&self, question: &str) -> Result<RelayReply, RelayError> {
        let question = question.trim();
        if question.is_empty() {
            tracing::debug!("Rejecting submission without question");
            return Ok(RelayReply::message(
                String::new(),
                self.messages.missing_question.clone(),
            ));
        }

        let job = Job::new();
        self.job_repository.put(&job).await?;

        let job_id = job.id.clone();
        tracing::info!(job_id = %job_id, "Job created");

        self.completion_sender
            .send(CompletionRequest {
                job,
                question: question.to_string(),
            })
            .await
            .map_err(|_| RelayError::DispatchClosed(job_id.clone()))?;

        Ok(RelayReply::message(
            job_id.to_string(),
            self.messages.placeholder.clone(),
        ))
    }

    #[tracing::instrument(skip(self, id), fields(job_id = %id))]
    pub async fn poll(&self, id: &JobId) -> Result<RelayReply, RelayError> {
        match self.job_repository.get(id).await? {
            Some(job) => {
                let verify = verify_marker(&job.result).to_string();
                tracing::debug!(
                    status = %job.status,
                    complete = !verify.is_empty(),
                    "Job polled"
                );
                Ok(RelayReply {
                    question_id: id.to_string(),
                    answer: job.result,
                    verify,
                })
            }
            None => {
                tracing::debug!("Polled job not found");
                Ok(RelayReply::message(
                    id.to_string(),
                    self.messages.not_found.clone(),
                ))
            }
        }
    }
}

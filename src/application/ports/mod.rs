mod event_stream_client;
mod job_repository;
mod llm_client;
mod repository_error;

pub use event_stream_client::{EventLineStream, EventStreamClient};
pub use job_repository::JobRepository;
pub use llm_client::{LlmClient, LlmClientError};
pub use repository_error::RepositoryError;

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde_json::Value;

use super::LlmClientError;

/// Lines of an upstream `text/event-stream` body, terminators stripped.
/// Blank lines are kept: they delimit events.
pub type EventLineStream = BoxStream<'static, Result<String, LlmClientError>>;

#[async_trait]
pub trait EventStreamClient: Send + Sync {
    async fn open(&self, payload: &Value) -> Result<EventLineStream, LlmClientError>;
}

use std::sync::Arc;

use serde_json::Value;

use crate::application::ports::{EventLineStream, EventStreamClient, LlmClientError};

/// Pass-through to an event-stream upstream. Nothing is persisted: the
/// client reads the answer as it is produced.
pub struct StreamProxyService {
    client: Arc<dyn EventStreamClient>,
}

impl StreamProxyService {
    pub fn new(client: Arc<dyn EventStreamClient>) -> Self {
        Self { client }
    }

    #[tracing::instrument(skip_all)]
    pub async fn forward(&self, payload: &Value) -> Result<EventLineStream, LlmClientError> {
        tracing::info!("Forwarding stream request");
        self.client.open(payload).await.inspect_err(|e| {
            tracing::error!(error = %e, "Event stream upstream unavailable");
        })
    }
}

use std::time::Duration;

use crate::application::ports::{LlmClient, LlmClientError};

/// Stand-in upstream for scaffold mode: answers every prompt after a fixed delay.
pub struct MockLlmClient {
    delay: Duration,
}

impl MockLlmClient {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let question = prompt.lines().last().unwrap_or_default();
        Ok(format!("Mock answer. {}", question))
    }
}

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::StreamExt;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::Value;

use crate::application::ports::{EventLineStream, EventStreamClient, LlmClientError};

/// Forwards a JSON payload to a server-sent-events endpoint and hands back
/// its body line by line as it arrives.
pub struct SseProxyClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl SseProxyClient {
    /// `timeout` bounds connecting and each wait for the next chunk, not
    /// the stream as a whole.
    pub fn new(
        endpoint: String,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, LlmClientError> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl EventStreamClient for SseProxyClient {
    async fn open(&self, payload: &Value) -> Result<EventLineStream, LlmClientError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(ACCEPT, "text/event-stream")
            .json(payload)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        // The upstream's own error events are relayed like any other body.
        if !response.status().is_success() {
            tracing::warn!(
                status = %response.status(),
                "Event stream upstream returned an error status"
            );
        }

        let mut chunks = response.bytes_stream();
        let lines = async_stream::stream! {
            let mut pending: Vec<u8> = Vec::new();

            while let Some(chunk) = chunks.next().await {
                match chunk {
                    Ok(bytes) => {
                        pending.extend_from_slice(&bytes);
                        while let Some(end) = pending.iter().position(|b| *b == b'\n') {
                            let line: Vec<u8> = pending.drain(..=end).collect();
                            yield Ok(decode_line(&line));
                        }
                    }
                    Err(e) => {
                        yield Err(LlmClientError::ApiRequestFailed(e.to_string()));
                        return;
                    }
                }
            }

            if !pending.is_empty() {
                yield Ok(decode_line(&pending));
            }
        };

        Ok(lines.boxed())
    }
}

fn decode_line(raw: &[u8]) -> String {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}

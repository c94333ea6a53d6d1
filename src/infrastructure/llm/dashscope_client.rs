use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::application::ports::{LlmClient, LlmClientError};

pub const DEFAULT_BASE_URL: &str = "https://dashscope.aliyuncs.com";

/// Client for a DashScope application completion endpoint.
pub struct DashScopeClient {
    client: Client,
    api_key: String,
    application_id: String,
    base_url: String,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    input: CompletionInput<'a>,
    parameters: Map<String, Value>,
}

#[derive(Serialize)]
struct CompletionInput<'a> {
    prompt: &'a str,
}

impl DashScopeClient {
    pub fn new(
        api_key: String,
        application_id: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, LlmClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            application_id,
            base_url,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/api/v1/apps/{}/completion",
            self.base_url.trim_end_matches('/'),
            self.application_id
        )
    }
}

#[async_trait]
impl LlmClient for DashScopeClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        let request_body = CompletionRequest {
            input: CompletionInput { prompt },
            parameters: Map::new(),
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        // A JSON body is an answer whatever the status: error envelopes carry
        // no `output.text` and so read as an empty answer.
        match serde_json::from_slice::<Value>(&body) {
            Ok(document) => {
                if !status.is_success() {
                    tracing::warn!(status = %status, "Upstream returned an error envelope");
                }
                Ok(answer_text(document))
            }
            Err(_) if status == reqwest::StatusCode::TOO_MANY_REQUESTS => {
                Err(LlmClientError::RateLimited)
            }
            Err(_) if !status.is_success() => Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status,
                String::from_utf8_lossy(&body)
            ))),
            Err(e) => Err(LlmClientError::InvalidResponse(e.to_string())),
        }
    }
}

fn answer_text(mut document: Value) -> String {
    match document.pointer_mut("/output/text") {
        Some(text) => output_text(text.take()),
        None => String::new(),
    }
}

/// `output.text` is usually a string but some applications return a list of
/// segments; those are joined line by line.
fn output_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text,
        Value::Array(items) => join_lines(items),
        Value::Object(fields) => join_lines(fields.into_iter().map(|(_, v)| v).collect()),
        other => other.to_string(),
    }
}

fn join_lines(items: Vec<Value>) -> String {
    items
        .into_iter()
        .map(|item| match item {
            Value::String(text) => text,
            Value::Null => String::new(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}


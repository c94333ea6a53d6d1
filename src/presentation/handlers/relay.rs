use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::services::RelayReply;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

const JSON_UTF8: &str = "application/json; charset=utf-8";

#[derive(Debug, Default)]
pub struct RelayRequest {
    pub question_id: Option<String>,
    pub question: Option<String>,
}

impl RelayRequest {
    /// Fields are read one by one, so a badly typed `questionId` does not
    /// discard `question`. Scalars are taken in their textual form; a body
    /// that is not a JSON object reads as an empty request, which lands on
    /// the missing-question reply.
    pub fn from_body(body: &[u8]) -> Self {
        let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(body) else {
            return Self::default();
        };

        Self {
            question_id: fields.get("questionId").and_then(text_field),
            question: fields.get("question").and_then(text_field),
        }
    }
}

fn text_field(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResponse {
    pub question_id: String,
    pub answer: String,
    pub verify: String,
}

impl From<RelayReply> for RelayResponse {
    fn from(reply: RelayReply) -> Self {
        Self {
            question_id: reply.question_id,
            answer: reply.answer,
            verify: reply.verify,
        }
    }
}

#[tracing::instrument(skip(state, body))]
pub async fn relay_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let request = RelayRequest::from_body(&body);
    let question_id = request.question_id.unwrap_or_default();
    let question = request.question.unwrap_or_default();

    tracing::debug!(
        question_id = %question_id.trim(),
        question = %sanitize_prompt(&question),
        "Relay request received"
    );

    match state.relay_service.handle(&question_id, &question).await {
        Ok(reply) => json_response(StatusCode::OK, &RelayResponse::from(reply)),
        Err(e) => {
            tracing::error!(error = %e, "Relay request failed");
            let response = RelayResponse {
                question_id: question_id.trim().to_string(),
                answer: state.relay_service.messages().storage_failure.clone(),
                verify: String::new(),
            };
            json_response(StatusCode::SERVICE_UNAVAILABLE, &response)
        }
    }
}

/// OPTIONS always succeeds with an empty body. Behind the CORS layer this
/// is only reached when the router is mounted without it.
pub async fn preflight_handler() -> impl IntoResponse {
    StatusCode::OK
}

fn json_response(status: StatusCode, body: &RelayResponse) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => (
            status,
            [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))],
            Body::from(bytes),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode relay response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

use std::convert::Infallible;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures::stream::StreamExt;
use serde_json::Value;

use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

const EVENT_STREAM: &str = "text/event-stream";

fn error_event(message: &str) -> String {
    format!("event: error\ndata: {}\n\n", message)
}

/// Relays the posted JSON to the event-stream upstream and streams its body
/// back line by line. Failures are reported as `event: error` frames.
#[tracing::instrument(skip(state, body))]
pub async fn stream_handler(State(state): State<AppState>, body: Bytes) -> Response {
    tracing::info!(
        body = %sanitize_prompt(&String::from_utf8_lossy(&body)),
        "Stream request received"
    );

    let payload = match serde_json::from_slice::<Value>(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(error = %e, "Stream request body is not JSON");
            return event_stream_response(
                StatusCode::BAD_REQUEST,
                Body::from(error_event("Invalid JSON format")),
            );
        }
    };

    let mut lines = match state.stream_proxy.forward(&payload).await {
        Ok(lines) => lines,
        Err(e) => {
            return event_stream_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                Body::from(error_event(&format!("Server error - {}", e))),
            );
        }
    };

    let frames = async_stream::stream! {
        while let Some(line) = lines.next().await {
            match line {
                Ok(line) => yield Ok::<_, Infallible>(Bytes::from(line + "\n")),
                Err(e) => {
                    tracing::error!(error = %e, "Event stream interrupted");
                    let frame = format!("\n{}", error_event(&format!("Server error - {}", e)));
                    yield Ok(Bytes::from(frame));
                    break;
                }
            }
        }
    };

    event_stream_response(StatusCode::OK, Body::from_stream(frames))
}

fn event_stream_response(status: StatusCode, body: Body) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(EVENT_STREAM)),
            (header::CACHE_CONTROL, HeaderValue::from_static("no-cache")),
        ],
        body,
    )
        .into_response()
}

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::error::UpstreamError;
use crate::routes::CHAT;

use super::AppState;
use super::forward::{json_response, parse_body};

const TIMEOUT_MESSAGE: &str = "Request timed out. The backend service may be slow or unavailable.";
const UNREADABLE_MESSAGE: &str = "Failed to process request";
const UNREADABLE_APOLOGY: &str =
    "Sorry, there was an error processing your request. Please try again.";

/// Relay a chat turn to the LLM backend. Failures are always answered with
/// 200 and an apology so the conversation view keeps rendering.
pub async fn chat_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let body = match parse_body(&body) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "could not read chat request");
            let mut body = fallback(UNREADABLE_MESSAGE, Value::from(""));
            body["response"] = Value::from(UNREADABLE_APOLOGY);
            return json_response(StatusCode::OK, body);
        }
    };
    let session_id = session_id(&body);

    let url = CHAT.url(&state.config);
    match state.upstream.post_json(&url, &body, CHAT.timeout).await {
        Ok(data) => Json(data).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "chat backend call failed");
            json_response(StatusCode::OK, fallback(&failure_message(&err), session_id))
        }
    }
}

fn failure_message(err: &UpstreamError) -> String {
    match err {
        UpstreamError::Status { status, reason } => {
            let prefix = CHAT.on_status.map(|s| s.prefix).unwrap_or("Backend error");
            format!("{prefix}: {} {reason}", status.as_u16())
        }
        err if err.is_timeout() => TIMEOUT_MESSAGE.to_string(),
        _ => CHAT.on_failure.message.to_string(),
    }
}

/// Echo the caller's session id. Falsy values (missing, null, false, "", 0)
/// become an empty string.
fn session_id(body: &Value) -> Value {
    match body.get("session_id") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Value::from(""),
        Some(Value::String(s)) if s.is_empty() => Value::from(""),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Value::from(""),
        Some(other) => other.clone(),
    }
}

/// The route's error body, which carries the apology under `response`.
fn fallback(error: &str, session_id: Value) -> Value {
    let mut body = CHAT.error_body(error);
    body["session_id"] = session_id;
    body["extracted_features"] = json!({});
    body
}

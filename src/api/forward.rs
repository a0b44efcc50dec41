use axum::{
    Json,
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::error::UpstreamError;
use crate::routes::RouteSpec;

use super::AppState;

/// Inbound bodies are parsed by hand so that a malformed body still gets the
/// route's JSON error shape instead of an extractor rejection.
pub fn parse_body(bytes: &Bytes) -> Result<Value, serde_json::Error> {
    serde_json::from_slice(bytes)
}

pub fn json_response(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

/// Parse the inbound body and relay it unchanged.
pub async fn relay(state: &AppState, spec: &RouteSpec, bytes: &Bytes) -> Response {
    match parse_body(bytes) {
        Ok(body) => forward(state, spec, body).await,
        Err(e) => unreadable_body(spec, &e),
    }
}

/// POST `payload` to the route's upstream and pass the reply through.
pub async fn forward(state: &AppState, spec: &RouteSpec, payload: Value) -> Response {
    let url = spec.url(&state.config);
    match state.upstream.post_json(&url, &payload, spec.timeout).await {
        Ok(data) => Json(data).into_response(),
        Err(err) => upstream_failure(spec, &err),
    }
}

pub fn upstream_failure(spec: &RouteSpec, err: &UpstreamError) -> Response {
    let (status, body) = failure_body(spec, err);
    json_response(status, body)
}

/// Status and normalized body for a failed outbound call.
pub fn failure_body(spec: &RouteSpec, err: &UpstreamError) -> (StatusCode, Value) {
    let (status, message) = match err.status_code() {
        Some(code) => spec.status_failure(code),
        None => spec.failure(),
    };
    tracing::error!(route = spec.name, error = %err, %status, "upstream call failed");
    (status, spec.error_body(message))
}

pub fn unreadable_body(spec: &RouteSpec, err: &serde_json::Error) -> Response {
    tracing::error!(route = spec.name, error = %err, "could not read request body");
    let (status, message) = spec.failure();
    json_response(status, spec.error_body(message))
}

/// Client input error. Answered before any outbound call.
pub fn rejected(spec: &RouteSpec, message: &str) -> Response {
    tracing::warn!(route = spec.name, message, "rejected request");
    json_response(StatusCode::BAD_REQUEST, spec.error_body(message))
}

/// A 5-character `zipCode` string.
pub fn five_char_zip(body: &Value) -> Option<&str> {
    body.get("zipCode")
        .and_then(Value::as_str)
        .filter(|zip| zip.chars().count() == 5)
}

/// A present, non-empty identifier given either as a string or a number.
pub fn identifier(body: &Value, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

use axum::{body::Bytes, extract::State, http::StatusCode, response::Response};
use serde_json::{Value, json};

use crate::routes::EXTRACT_FEATURES;

use super::AppState;
use super::forward::{failure_body, json_response, parse_body};

/// Outcome of pulling a JSON object out of a language-model reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Parsed(Value),
    /// No `{ ... }` candidate in the text.
    NotFound,
    /// A candidate was found but is not valid JSON.
    Invalid,
}

impl Extraction {
    pub fn into_body(self) -> Value {
        match self {
            Extraction::Parsed(features) => json!({ "features": features, "success": true }),
            Extraction::NotFound => json!({
                "features": null,
                "success": false,
                "error": "Could not extract features",
            }),
            Extraction::Invalid => json!({
                "features": null,
                "success": false,
                "error": "Invalid feature format",
            }),
        }
    }
}

pub fn extraction_prompt(message: &str) -> String {
    format!(
        r#"
      You are a real estate assistant that extracts structured data from user queries.

      Extract the following information from this query:
      - Query type: general, property_search, property_detail, market_info, legal, preferences
      - Zip code: Any US zip code mentioned
      - Property features: bedrooms, bathrooms, square footage, property type, year built, etc.
      - Location features: neighborhood, city, proximity requirements
      - Specific action: show_listings, show_details, compare_properties, analyze_market, etc.
      - Filters: price range, min/max values for features, must-have amenities
      - Sort preference: price_asc, price_desc, newest, etc.

      Respond in valid JSON format with these fields (use null for missing values).

      User query: {message}
    "#
    )
}

/// Everything from the first `{` to the last `}`. This is a greedy slice,
/// not a balanced-brace scan: unrelated braces after the object widen it.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// `response` is the model's free text, or `None` when the backend reply had
/// no string `response` field.
pub fn extract_features(response: Option<&str>) -> Extraction {
    let Some(text) = response else {
        return Extraction::Invalid;
    };
    match extract_json_object(text) {
        None => Extraction::NotFound,
        Some(candidate) => match serde_json::from_str::<Value>(candidate) {
            Ok(features) => Extraction::Parsed(features),
            Err(e) => {
                tracing::warn!(error = %e, "model reply is not valid JSON");
                Extraction::Invalid
            }
        },
    }
}

pub async fn extract_features_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let spec = &EXTRACT_FEATURES;
    let body = match parse_body(&body) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "could not read feature extraction request");
            let (status, message) = spec.failure();
            return failed(status, spec.error_body(message));
        }
    };
    let message = body.get("message").map(query_text).unwrap_or_default();

    let payload = json!({
        "message": extraction_prompt(&message),
        "is_system_query": true,
    });

    let url = spec.url(&state.config);
    let reply = match state.upstream.post_json(&url, &payload, spec.timeout).await {
        Ok(reply) => reply,
        Err(err) => {
            let (status, failure) = failure_body(spec, &err);
            return failed(status, failure);
        }
    };

    let extraction = extract_features(reply.get("response").and_then(Value::as_str));
    json_response(StatusCode::OK, extraction.into_body())
}

/// `message` as it reads once interpolated into the prompt. Arrays join
/// with commas and objects read `[object Object]`. Null is empty.
fn query_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 => format!("{f:.0}"),
            _ => n.to_string(),
        },
        Value::Array(items) => items.iter().map(query_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Failures from this route also carry `success: false`.
fn failed(status: StatusCode, mut body: Value) -> Response {
    body["success"] = Value::Bool(false);
    json_response(status, body)
}

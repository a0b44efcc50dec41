use axum::{body::Bytes, extract::State, response::Response};
use serde_json::{Map, Value};

use crate::routes::{
    AGENTS, CUSTOM_AMENITIES, LOCATION, MARKET_TRENDS, PROPERTIES, PROPERTY_DETAILS, RouteSpec,
};

use super::AppState;
use super::forward::{five_char_zip, forward, parse_body, rejected, relay, unreadable_body};

pub async fn properties_handler(State(state): State<AppState>, body: Bytes) -> Response {
    relay(&state, &PROPERTIES, &body).await
}

pub async fn property_details_handler(State(state): State<AppState>, body: Bytes) -> Response {
    relay(&state, &PROPERTY_DETAILS, &body).await
}

pub async fn market_trends_handler(State(state): State<AppState>, body: Bytes) -> Response {
    relay(&state, &MARKET_TRENDS, &body).await
}

pub async fn agents_handler(State(state): State<AppState>, body: Bytes) -> Response {
    relay(&state, &AGENTS, &body).await
}

pub async fn location_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let body = match parse_body(&body) {
        Ok(body) => body,
        Err(e) => return unreadable_body(&LOCATION, &e),
    };
    let Some(zip) = five_char_zip(&body) else {
        return rejected(&LOCATION, "Invalid zip code");
    };
    let payload = location_payload(zip, body.get("type").cloned());
    forward(&state, &LOCATION, payload).await
}

pub async fn custom_amenities_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let spec: &RouteSpec = &CUSTOM_AMENITIES;
    let body = match parse_body(&body) {
        Ok(body) => body,
        Err(e) => return unreadable_body(spec, &e),
    };
    let Some(zip) = five_char_zip(&body) else {
        return rejected(spec, "Invalid zip code");
    };
    let Some(amenity) = body.get("amenityType").and_then(Value::as_str) else {
        return rejected(spec, "Amenity type is required");
    };
    let search_type = amenity_search_term(amenity);
    tracing::info!(zip, amenity, search_type, "custom amenity search");

    let payload = location_payload(zip, Some(Value::String(search_type.to_string())));
    forward(&state, spec, payload).await
}

/// Map a free-form amenity description onto the search term the location
/// backend understands. Unknown amenities pass through unchanged.
pub fn amenity_search_term(amenity: &str) -> &str {
    const TERMS: [(&str, &str); 6] = [
        ("coffee", "Coffee Shop"),
        ("school", "School"),
        ("grocery", "Grocery Store"),
        ("hospital", "Hospital"),
        ("park", "Park"),
        ("library", "Library"),
    ];
    TERMS
        .iter()
        .find(|(needle, _)| amenity.contains(needle))
        .map(|(_, term)| *term)
        .unwrap_or(amenity)
}

fn location_payload(zip: &str, kind: Option<Value>) -> Value {
    let mut payload = Map::new();
    payload.insert("zipCode".into(), Value::String(zip.to_string()));
    if let Some(kind) = kind {
        payload.insert("type".into(), kind);
    }
    Value::Object(payload)
}

//! Routes that call the Zillow RapidAPI provider directly.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use serde_json::{Value, json};

use super::AppState;
use super::forward::{identifier, json_response, parse_body};
use super::models::{AgentRatings, FallbackAgent};

static ZIP_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{5}").expect("valid zip regex"));

pub async fn off_market_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let body = match parse_body(&body) {
        Ok(body) => body,
        Err(e) => return internal_error(&e.to_string()),
    };
    let Some(zip) = identifier(&body, "zipCode") else {
        return json_response(
            StatusCode::BAD_REQUEST,
            json!({ "error": "ZIP code is required", "data": null }),
        );
    };
    tracing::info!(%zip, "fetching off-market data");

    let url = format!("{}/offMarket", state.config.zillow_api_url);
    match rapidapi(&state, &url, &[("zip", zip.as_str())]).await {
        Ok(data) => Json(json!({ "data": data })).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "error fetching off-market data");
            provider_error("Failed to fetch off-market data", &err.to_string())
        }
    }
}

pub async fn tax_history_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let body = match parse_body(&body) {
        Ok(body) => body,
        Err(e) => return internal_error(&e.to_string()),
    };
    let Some(zpid) = identifier(&body, "zpid") else {
        return json_response(
            StatusCode::BAD_REQUEST,
            json!({ "error": "Property ID (zpid) is required" }),
        );
    };
    tracing::info!(%zpid, "fetching tax history");

    let url = format!("{}/priceAndTaxHistory", state.config.zillow_api_url);
    match rapidapi(&state, &url, &[("zpid", zpid.as_str())]).await {
        Ok(data) => Json(data).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "error fetching tax history data");
            provider_error("Failed to fetch tax history data", &err.to_string())
        }
    }
}

/// Agent directory search. Anything short of a usable provider reply is
/// answered with generated placeholder agents.
pub async fn search_agents_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let body = match parse_body(&body) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "could not read agent search request");
            let agents = placeholder_agents("");
            return Json(json!({ "agents": agents, "error": e.to_string() })).into_response();
        }
    };
    let location = match body.get("location").and_then(Value::as_str) {
        Some(location) if !location.is_empty() => location,
        _ => {
            return json_response(
                StatusCode::BAD_REQUEST,
                json!({ "error": "Location is required", "agents": [] }),
            );
        }
    };
    let specialty = body.get("specialty").and_then(Value::as_str).unwrap_or("Any");
    let language = body.get("language").and_then(Value::as_str).unwrap_or("English");

    if state.config.zillow_api_key.is_empty() {
        tracing::warn!("ZILLOW_RAPIDAPI_KEY not set, using fallback agents");
        return Json(json!({ "agents": placeholder_agents(location) })).into_response();
    }

    let url = format!("{}/search_agents", state.config.zillow_api_url);
    let query = [
        ("location", location),
        ("specialty", specialty),
        ("language", language),
    ];
    let agents = match rapidapi(&state, &url, &query).await {
        Ok(Value::Array(agents)) => json!(agents),
        Ok(_) => {
            tracing::warn!("unexpected agent search response, using fallback agents");
            placeholder_agents(location)
        }
        Err(err) => {
            tracing::warn!(error = %err, "agent search failed, using fallback agents");
            placeholder_agents(location)
        }
    };
    Json(json!({ "agents": agents })).into_response()
}

async fn rapidapi(
    state: &AppState,
    url: &str,
    query: &[(&str, &str)],
) -> crate::error::UpstreamResult<Value> {
    state
        .upstream
        .get_rapidapi(
            url,
            query,
            &state.config.zillow_api_key,
            &state.config.zillow_api_host,
        )
        .await
}

fn placeholder_agents(location: &str) -> Value {
    json!(fallback_agents(location, &mut rand::rng()))
}

fn provider_error(error: &str, message: &str) -> Response {
    json_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": error, "message": message }),
    )
}

fn internal_error(message: &str) -> Response {
    tracing::error!(message, "could not read request body");
    provider_error("Internal server error", message)
}

const FIRST_NAMES: [&str; 10] = [
    "Michael", "Sarah", "David", "Jennifer", "Robert", "Lisa", "John", "Maria", "James", "Emily",
];
const LAST_NAMES: [&str; 10] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez",
];
const BROKERAGES: [&str; 6] = [
    "Century 21",
    "RE/MAX",
    "Keller Williams",
    "Coldwell Banker",
    "Berkshire Hathaway",
    "Sotheby's International Realty",
];
const SPECIALIZATIONS: [&str; 6] = [
    "Residential",
    "Luxury Homes",
    "Commercial",
    "Investment Properties",
    "New Construction",
    "First-time Buyers",
];
const LANGUAGES: [&str; 5] = ["English", "Spanish", "Mandarin", "French", "German"];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

/// Generate 5 to 8 plausible agents for `location` ("City, ST 12345").
pub fn fallback_agents<R: Rng + ?Sized>(location: &str, rng: &mut R) -> Vec<FallbackAgent> {
    let zip = ZIP_RUN
        .find(location)
        .map(|m| m.as_str())
        .unwrap_or("00000");
    let without_zip = ZIP_RUN.replace(location, "");
    let city = without_zip
        .trim()
        .split(',')
        .next()
        .filter(|c| !c.is_empty())
        .unwrap_or("Unknown City");

    let count = rng.random_range(5..=8);
    (0..count)
        .map(|i| {
            let first = pick(rng, &FIRST_NAMES);
            let last = pick(rng, &LAST_NAMES);

            let mut languages: Vec<String> = Vec::new();
            for _ in 0..rng.random_range(1..=3) {
                let language = pick(rng, &LANGUAGES);
                if !languages.iter().any(|l| l == language) {
                    languages.push(language.to_string());
                }
            }
            if !languages.iter().any(|l| l == "English") {
                languages.push("English".to_string());
            }

            let average = ((4.0 + rng.random::<f64>()) * 10.0).round() / 10.0;
            let zuid_suffix: String = (0..8)
                .map(|_| {
                    let digit = rng.random_range(0..36u32);
                    char::from_digit(digit, 36).unwrap_or('0')
                })
                .collect();

            FallbackAgent {
                name: format!("{first} {last}"),
                broker_name: pick(rng, &BROKERAGES).to_string(),
                specialization: pick(rng, &SPECIALIZATIONS).to_string(),
                phone: format!(
                    "({}) {}-{}",
                    rng.random_range(100..1000),
                    rng.random_range(100..1000),
                    rng.random_range(1000..10000)
                ),
                email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
                languages,
                location: format!("{city}, {zip}"),
                active: true,
                encoded_zuid: format!("agent-{i}-{zuid_suffix}"),
                photo_url: None,
                ratings: AgentRatings {
                    average,
                    count: rng.random_range(5..55),
                },
                recent_sales: rng.random_range(1..=20),
                years_of_experience: rng.random_range(1..=20),
            }
        })
        .collect()
}

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use super::AppState;
use super::forward::{five_char_zip, json_response, parse_body};

const RADIUS_MILES: u32 = 10;
const MAX_NEARBY: usize = 5;

pub async fn nearby_zips_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let body = match parse_body(&body) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "could not read nearby zips request");
            return json_response(
                StatusCode::OK,
                json!({ "nearby_zips": [], "error": e.to_string() }),
            );
        }
    };
    let Some(zip) = five_char_zip(&body) else {
        return json_response(
            StatusCode::BAD_REQUEST,
            json!({ "error": "ZIP code is required and must be 5 digits", "nearby_zips": [] }),
        );
    };

    let Some(api_key) = state.config.zipcode_api_key.as_deref() else {
        tracing::warn!("ZIPCODE_API_KEY not set, using synthetic nearby zips");
        return nearby(fallback_nearby_zips(zip));
    };

    let url = format!(
        "{}/{}/radius.json/{}/{}/mile",
        state.config.zipcode_api_url, api_key, zip, RADIUS_MILES
    );
    match state.upstream.get_json(&url, &[], None).await {
        Ok(data) => match zip_codes(&data) {
            Some(zips) => nearby(zips),
            None => {
                tracing::warn!("unexpected zip code API response, using synthetic nearby zips");
                nearby(fallback_nearby_zips(zip))
            }
        },
        Err(err) => {
            tracing::warn!(error = %err, "zip code API failed, using synthetic nearby zips");
            nearby(fallback_nearby_zips(zip))
        }
    }
}

fn nearby(zips: Vec<String>) -> Response {
    Json(json!({ "nearby_zips": zips })).into_response()
}

fn zip_codes(data: &Value) -> Option<Vec<String>> {
    let entries = data.get("zip_codes")?.as_array()?;
    Some(
        entries
            .iter()
            .filter_map(|entry| entry.get("zip_code").and_then(Value::as_str))
            .map(str::to_string)
            .collect(),
    )
}

/// Synthesize neighbours by stepping the last two digits up and down.
/// Zip areas are roughly sequential, so this is close enough for display.
pub fn fallback_nearby_zips(zip: &str) -> Vec<String> {
    let (Some(prefix), Some(suffix)) = (zip.get(..3), zip.get(3..)) else {
        return Vec::new();
    };
    let Ok(base) = suffix.parse::<u32>() else {
        return Vec::new();
    };

    let mut zips = Vec::new();
    for step in 1..=MAX_NEARBY as u32 {
        zips.push(format!("{prefix}{:02}", base + step));
        if base >= step {
            zips.push(format!("{prefix}{:02}", base - step));
        }
        if zips.len() >= MAX_NEARBY {
            break;
        }
    }
    zips.truncate(MAX_NEARBY);
    zips
}

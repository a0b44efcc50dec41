//! Free-text US address helpers.

use once_cell::sync::Lazy;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use serde::{Deserialize, Serialize};

static ZIP_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u:\b)([0-9]{5})(?-u:\b)").expect("valid zip regex"));

// "City, ST 12345", state letters matched case-insensitively
static CITY_STATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([^,]+),\s*([A-Z]{2})\s*[0-9]{5}").expect("valid city/state regex")
});

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CityState {
    pub city: Option<String>,
    pub state: Option<String>,
}

/// First standalone 5-digit run.
pub fn extract_zip_code(address: &str) -> Option<String> {
    ZIP_CODE
        .captures(address)
        .map(|caps| caps[1].to_string())
}

pub fn extract_city_state(address: &str) -> CityState {
    match CITY_STATE.captures(address) {
        Some(caps) => CityState {
            city: Some(caps[1].trim().to_string()),
            state: Some(caps[2].to_uppercase()),
        },
        None => CityState::default(),
    }
}

pub fn maps_search_url(address: &str) -> String {
    format!(
        "{MAPS_SEARCH_URL}{}",
        utf8_percent_encode(address, URI_COMPONENT)
    )
}

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::upstream::Upstream;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Address → coordinates. Implementations swallow their own failures.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Option<Coordinates>;
}

/// Resolve `address` with whatever geocoder is available; `None` when there
/// is no geocoder or it cannot place the address.
pub async fn coordinates_for(geocoder: Option<&dyn Geocoder>, address: &str) -> Option<Coordinates> {
    match geocoder {
        Some(geocoder) => geocoder.geocode(address).await,
        None => {
            log::error!("no geocoding service configured");
            None
        }
    }
}

/// Geocoder backed by the Google Geocoding HTTP API.
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    upstream: Upstream,
    base_url: String,
    api_key: String,
}

impl GoogleGeocoder {
    pub fn new(upstream: Upstream, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            upstream,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// `None` when no `GOOGLE_MAPS_API_KEY` is configured.
    pub fn from_config(upstream: Upstream, config: &Config) -> Option<Self> {
        let key = config.google_maps_api_key.as_deref()?;
        Some(Self::new(upstream, config.geocoding_api_url.clone(), key))
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn geocode(&self, address: &str) -> Option<Coordinates> {
        let url = format!("{}/maps/api/geocode/json", self.base_url);
        let query = [("address", address), ("key", self.api_key.as_str())];
        let reply = match self.upstream.get_json(&url, &query, None).await {
            Ok(reply) => reply,
            Err(e) => {
                log::error!("geocoding request failed: {e}");
                return None;
            }
        };
        if reply["status"] != "OK" {
            log::error!("geocode was not successful: {}", reply["status"]);
            return None;
        }
        first_location(&reply)
    }
}

fn first_location(reply: &Value) -> Option<Coordinates> {
    let location = reply.get("results")?.get(0)?.get("geometry")?.get("location")?;
    Some(Coordinates {
        lat: location.get("lat")?.as_f64()?,
        lng: location.get("lng")?.as_f64()?,
    })
}

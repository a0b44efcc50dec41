use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

use crate::routes::Backend;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config::from_env()
});

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub static_dir: String,
    pub primary_backend_url: String,
    pub secondary_backend_url: String,
    pub local_backend_url: String,
    pub zillow_api_url: String,
    pub zillow_api_host: String,
    /// Empty when unset; the provider rejects the call rather than us.
    pub zillow_api_key: String,
    pub zipcode_api_url: String,
    pub zipcode_api_key: Option<String>,
    pub geocoding_api_url: String,
    pub google_maps_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_source<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let get_or_default =
            |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Config {
            bind_addr: get_or_default("GATEWAY_BIND_ADDR", "0.0.0.0:3000"),
            static_dir: get_or_default("GATEWAY_STATIC_DIR", "static"),
            primary_backend_url: trim_base(get_or_default(
                "PRIMARY_BACKEND_URL",
                "https://cs532-project-dubl.onrender.com",
            )),
            secondary_backend_url: trim_base(get_or_default(
                "SECONDARY_BACKEND_URL",
                "https://cs532-project.onrender.com",
            )),
            local_backend_url: trim_base(get_or_default(
                "LOCAL_BACKEND_URL",
                "http://localhost:5000",
            )),
            zillow_api_url: trim_base(get_or_default(
                "ZILLOW_API_URL",
                "https://zillow-com1.p.rapidapi.com",
            )),
            zillow_api_host: get_or_default("ZILLOW_API_HOST", "zillow-com1.p.rapidapi.com"),
            zillow_api_key: get_or_default("ZILLOW_RAPIDAPI_KEY", ""),
            zipcode_api_url: trim_base(get_or_default(
                "ZIPCODE_API_URL",
                "https://www.zipcodeapi.com/rest",
            )),
            zipcode_api_key: get("ZIPCODE_API_KEY"),
            geocoding_api_url: trim_base(get_or_default(
                "GEOCODING_API_URL",
                "https://maps.googleapis.com",
            )),
            google_maps_api_key: get("GOOGLE_MAPS_API_KEY"),
        }
    }

    pub fn backend_url(&self, backend: Backend) -> &str {
        match backend {
            Backend::Primary => &self.primary_backend_url,
            Backend::Secondary => &self.secondary_backend_url,
            Backend::Local => &self.local_backend_url,
        }
    }

    /// Point every upstream at a single base URL. Handy for stub servers.
    pub fn with_all_upstreams(base: &str) -> Self {
        let base = trim_base(base.to_string());
        let mut config = Self::from_source(|_| None);
        config.primary_backend_url = base.clone();
        config.secondary_backend_url = base.clone();
        config.local_backend_url = base.clone();
        config.zillow_api_url = base.clone();
        config.zipcode_api_url = base.clone();
        config.geocoding_api_url = base;
        config
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::config::Config;
use crate::routes;
use crate::upstream::Upstream;

pub mod chat;
pub mod features;
pub mod forward;
pub mod handlers;
pub mod health;
pub mod models;
pub mod nearby;
pub mod translate;
pub mod zillow;

/// Immutable per-process state shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub upstream: Upstream,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_upstream(config, Upstream::new())
    }

    pub fn with_upstream(config: Config, upstream: Upstream) -> Self {
        Self {
            config: Arc::new(config),
            upstream,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = state.config.static_dir.clone();

    Router::new()
        // Backend forwarders
        .route(routes::CHAT.path, post(chat::chat_handler))
        .route(
            routes::EXTRACT_FEATURES.path,
            post(features::extract_features_handler),
        )
        .route(routes::PROPERTIES.path, post(handlers::properties_handler))
        .route(
            routes::PROPERTY_DETAILS.path,
            post(handlers::property_details_handler),
        )
        .route(
            routes::MARKET_TRENDS.path,
            post(handlers::market_trends_handler),
        )
        .route(routes::AGENTS.path, post(handlers::agents_handler))
        .route(routes::LOCATION.path, post(handlers::location_handler))
        .route(
            routes::CUSTOM_AMENITIES.path,
            post(handlers::custom_amenities_handler),
        )
        .route(routes::TRANSLATE.path, post(translate::translate_handler))
        .route(routes::HEALTH.path, get(health::health_handler))
        // Direct data providers
        .route("/api/off_market", post(zillow::off_market_handler))
        .route("/api/tax_history", post(zillow::tax_history_handler))
        .route("/api/search_agents", post(zillow::search_agents_handler))
        .route("/api/nearby_zips", post(nearby::nearby_zips_handler))
        // Handlers read raw bytes and answer every unreadable body in JSON,
        // so the extractor's plain-text 413 must never fire
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
        // Static file serving for the UI
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
}

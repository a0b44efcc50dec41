use axum::{Json, extract::State};

use crate::error::UpstreamError;
use crate::routes::HEALTH;

use super::AppState;
use super::models::{BackendState, HealthReport, HealthStatus};

/// Probe the local backend. Always answers 200; only the body varies.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthReport> {
    let url = HEALTH.url(&state.config);
    let report = match state.upstream.get_json(&url, &[], HEALTH.timeout).await {
        Ok(details) => HealthReport {
            status: HealthStatus::Ok,
            backend: BackendState::Connected,
            backend_details: Some(details),
            message: None,
        },
        Err(UpstreamError::Status { status, .. }) => {
            tracing::warn!(%status, "backend health probe returned an error");
            HealthReport {
                status: HealthStatus::Warning,
                backend: BackendState::Error,
                backend_details: None,
                message: HEALTH.on_status.map(|s| s.prefix.to_string()),
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "health check failed");
            HealthReport {
                status: HealthStatus::Error,
                backend: BackendState::Disconnected,
                backend_details: None,
                message: Some(HEALTH.on_failure.message.to_string()),
            }
        }
    };
    Json(report)
}

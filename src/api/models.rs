use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendState {
    Connected,
    Error,
    Disconnected,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub backend: BackendState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,
    pub source_language: Option<String>,
    pub target_language: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub translated_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranslateResponse {
    pub fn untranslated(text: String, error: Option<String>) -> Self {
        TranslateResponse {
            translated_text: text,
            source_language: None,
            target_language: None,
            error,
        }
    }
}

/// Placeholder agent shown when the agent directory is unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackAgent {
    pub name: String,
    pub broker_name: String,
    pub specialization: String,
    pub phone: String,
    pub email: String,
    pub languages: Vec<String>,
    pub location: String,
    pub active: bool,
    pub encoded_zuid: String,
    pub photo_url: Option<String>,
    pub ratings: AgentRatings,
    pub recent_sales: u32,
    pub years_of_experience: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRatings {
    pub average: f64,
    pub count: u32,
}

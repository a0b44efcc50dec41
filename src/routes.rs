//! Route table for every backend-forwarding endpoint.
//!
//! The backends behind these routes are not uniform: they live on different
//! hosts and they disagree on whether a failure should surface as an error
//! status or as an empty 200. Both differences are kept, but they are written
//! down here instead of inside each handler.

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::{Map, Value};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Primary,
    Secondary,
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Report the failure with HTTP 500.
    Strict,
    /// Report the failure with HTTP 200 so the browser renders "no data".
    Masked,
}

impl FailurePolicy {
    pub fn status_code(self) -> StatusCode {
        match self {
            FailurePolicy::Strict => StatusCode::INTERNAL_SERVER_ERROR,
            FailurePolicy::Masked => StatusCode::OK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyDefault {
    List,
    Null,
    Text(&'static str),
}

impl EmptyDefault {
    pub fn value(self) -> Value {
        match self {
            EmptyDefault::List => Value::Array(Vec::new()),
            EmptyDefault::Null => Value::Null,
            EmptyDefault::Text(s) => Value::String(s.to_string()),
        }
    }
}

/// Key added next to `error` in a failure body, and its empty value.
#[derive(Debug, Clone, Copy)]
pub struct EmptyField {
    pub key: &'static str,
    pub value: EmptyDefault,
}

/// How a non-2xx remote status is reported, when the route reports it at all.
#[derive(Debug, Clone, Copy)]
pub struct StatusFailure {
    pub policy: FailurePolicy,
    pub prefix: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Failure {
    pub policy: FailurePolicy,
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct RouteSpec {
    pub name: &'static str,
    pub path: &'static str,
    pub backend: Backend,
    pub endpoint: &'static str,
    pub timeout: Option<Duration>,
    /// `None` means a non-2xx status is treated like any other failure.
    pub on_status: Option<StatusFailure>,
    pub on_failure: Failure,
    /// `None` for routes whose replies are not `{error, ...}` bodies.
    pub empty: Option<EmptyField>,
}

impl RouteSpec {
    pub fn url(&self, config: &Config) -> String {
        format!("{}{}", config.backend_url(self.backend), self.endpoint)
    }

    /// Normalized error body: the message plus the route's empty default.
    pub fn error_body(&self, message: impl Into<String>) -> Value {
        let mut body = Map::new();
        body.insert("error".into(), Value::String(message.into()));
        if let Some(EmptyField { key, value }) = self.empty {
            body.insert(key.into(), value.value());
        }
        Value::Object(body)
    }

    /// Status and message for a non-2xx remote response.
    pub fn status_failure(&self, status: StatusCode) -> (StatusCode, String) {
        match self.on_status {
            Some(StatusFailure { policy, prefix }) => (
                policy.status_code(),
                format!("{prefix} with status: {}", status.as_u16()),
            ),
            None => self.failure(),
        }
    }

    /// Status and message for a transport, decode or inbound-body failure.
    pub fn failure(&self) -> (StatusCode, String) {
        (
            self.on_failure.policy.status_code(),
            self.on_failure.message.to_string(),
        )
    }
}

pub const CHAT_APOLOGY: &str =
    "Sorry, there was an error connecting to the AI service. Please try again in a moment.";

pub const CHAT: RouteSpec = RouteSpec {
    name: "chat",
    path: "/api/chat",
    backend: Backend::Primary,
    endpoint: "/api/chat",
    timeout: Some(Duration::from_secs(15)),
    on_status: Some(StatusFailure {
        policy: FailurePolicy::Masked,
        prefix: "Backend error",
    }),
    on_failure: Failure {
        policy: FailurePolicy::Masked,
        message: "Failed to connect to backend service.",
    },
    empty: Some(EmptyField {
        key: "response",
        value: EmptyDefault::Text(CHAT_APOLOGY),
    }),
};

pub const EXTRACT_FEATURES: RouteSpec = RouteSpec {
    name: "extract_features",
    path: "/api/extract_features",
    backend: Backend::Secondary,
    endpoint: "/api/chat",
    timeout: None,
    on_status: None,
    on_failure: Failure {
        policy: FailurePolicy::Strict,
        message: "Failed to extract features",
    },
    empty: Some(EmptyField {
        key: "features",
        value: EmptyDefault::Null,
    }),
};

pub const PROPERTIES: RouteSpec = RouteSpec {
    name: "properties",
    path: "/api/properties",
    backend: Backend::Local,
    endpoint: "/api/properties",
    timeout: None,
    on_status: Some(StatusFailure {
        policy: FailurePolicy::Masked,
        prefix: "Properties search failed",
    }),
    on_failure: Failure {
        policy: FailurePolicy::Masked,
        message: "Failed to process properties request",
    },
    empty: Some(EmptyField {
        key: "results",
        value: EmptyDefault::List,
    }),
};

pub const PROPERTY_DETAILS: RouteSpec = RouteSpec {
    name: "property_details",
    path: "/api/property_details",
    backend: Backend::Primary,
    endpoint: "/api/property",
    ..PROPERTIES
};

pub const MARKET_TRENDS: RouteSpec = RouteSpec {
    name: "market_trends",
    path: "/api/market_trends",
    backend: Backend::Secondary,
    endpoint: "/api/market_trends",
    timeout: None,
    on_status: None,
    on_failure: Failure {
        policy: FailurePolicy::Strict,
        message: "Failed to fetch market trends",
    },
    empty: Some(EmptyField {
        key: "trends",
        value: EmptyDefault::Null,
    }),
};

// The agents backend reuses the market-trends error shape.
pub const AGENTS: RouteSpec = RouteSpec {
    name: "agents",
    path: "/api/agents",
    backend: Backend::Primary,
    endpoint: "/api/search_agents",
    on_failure: Failure {
        policy: FailurePolicy::Strict,
        message: "Failed to fetch Property Agents",
    },
    ..MARKET_TRENDS
};

pub const LOCATION: RouteSpec = RouteSpec {
    name: "location",
    path: "/api/location",
    backend: Backend::Primary,
    endpoint: "/api/location",
    timeout: None,
    on_status: Some(StatusFailure {
        policy: FailurePolicy::Masked,
        prefix: "Location search failed",
    }),
    on_failure: Failure {
        policy: FailurePolicy::Strict,
        message: "Failed to process location request",
    },
    empty: Some(EmptyField {
        key: "results",
        value: EmptyDefault::List,
    }),
};

pub const CUSTOM_AMENITIES: RouteSpec = RouteSpec {
    name: "custom_amenities",
    path: "/api/custom_amenities",
    on_status: Some(StatusFailure {
        policy: FailurePolicy::Masked,
        prefix: "Search failed",
    }),
    on_failure: Failure {
        policy: FailurePolicy::Strict,
        message: "Failed to process request",
    },
    ..LOCATION
};

pub const TRANSLATE: RouteSpec = RouteSpec {
    name: "translate",
    path: "/api/translate",
    backend: Backend::Local,
    endpoint: "/api/translate",
    timeout: Some(Duration::from_secs(20)),
    on_status: Some(StatusFailure {
        policy: FailurePolicy::Masked,
        prefix: "Translation service error",
    }),
    on_failure: Failure {
        policy: FailurePolicy::Masked,
        message: "Translation failed",
    },
    empty: Some(EmptyField {
        key: "translatedText",
        value: EmptyDefault::Text(""),
    }),
};

pub const HEALTH: RouteSpec = RouteSpec {
    name: "health",
    path: "/api/health",
    backend: Backend::Local,
    endpoint: "/api/health",
    timeout: None,
    on_status: Some(StatusFailure {
        policy: FailurePolicy::Masked,
        prefix: "Flask backend returned an error",
    }),
    on_failure: Failure {
        policy: FailurePolicy::Masked,
        message: "Could not connect to Flask backend",
    },
    empty: None,
};

pub const ROUTE_TABLE: &[RouteSpec] = &[
    CHAT,
    EXTRACT_FEATURES,
    PROPERTIES,
    PROPERTY_DETAILS,
    MARKET_TRENDS,
    AGENTS,
    LOCATION,
    CUSTOM_AMENITIES,
    TRANSLATE,
    HEALTH,
];

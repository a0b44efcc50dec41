use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single outbound call.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("API returned status code {}", status.as_u16())]
    Status { status: StatusCode, reason: String },

    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Decode(String),
}

impl UpstreamError {
    pub fn status(status: StatusCode) -> Self {
        UpstreamError::Status {
            status,
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            UpstreamError::Timeout => true,
            UpstreamError::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }

    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type UpstreamResult<T> = Result<T, UpstreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_carries_code_in_message() {
        let err = UpstreamError::status(StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), "API returned status code 403");
        assert_eq!(err.status_code(), Some(StatusCode::FORBIDDEN));
        assert!(!err.is_timeout());
    }

    #[test]
    fn timeout_is_reported() {
        assert!(UpstreamError::Timeout.is_timeout());
        assert!(UpstreamError::Timeout.status_code().is_none());
    }
}

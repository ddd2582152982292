//! Error types for the portal HTTP client

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while talking to the portal API
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server rejected the credentials or the bearer token (401)
    #[error("Not authorized (HTTP {status})")]
    Unauthorized { status: u16 },

    /// Any other non-2xx response, including 403 for actions the user's role forbids
    #[error("Server responded with HTTP {status}")]
    Status { status: u16, body: String },

    /// Network or transport failure before a response arrived
    #[error("Transport error: {0}")]
    Transport(String),

    /// The attempt did not complete within the configured timeout
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// The response body was not the expected JSON
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Classify a non-2xx status
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        match status {
            401 => Self::Unauthorized { status },
            _ => Self::Status {
                status,
                body: body.into(),
            },
        }
    }

    /// Create a transport error
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a timeout error
    pub fn timeout(timeout: Duration) -> Self {
        Self::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        }
    }

    /// Create an invalid URL error
    pub fn invalid_url<S: Into<String>>(url: S) -> Self {
        Self::InvalidUrl(url.into())
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// HTTP status of the response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status } | Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the session behind the request is no longer valid
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Check if the failure may go away on its own (the request can be retried)
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout { .. } => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(error: url::ParseError) -> Self {
        Self::InvalidUrl(error.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(ClientError::from_status(401, "").is_auth_failure());

        let forbidden = ClientError::from_status(403, "role");
        assert!(!forbidden.is_auth_failure());
        assert!(!forbidden.is_transient());
        assert_eq!(forbidden.status(), Some(403));

        let not_found = ClientError::from_status(404, "missing");
        assert!(!not_found.is_auth_failure());
        assert!(!not_found.is_transient());
        assert_eq!(not_found.status(), Some(404));

        assert!(ClientError::from_status(503, "").is_transient());
        assert!(ClientError::from_status(429, "").is_transient());
    }

    #[test]
    fn test_transient_errors() {
        assert!(ClientError::transport("connection refused").is_transient());
        assert!(ClientError::timeout(Duration::from_secs(1)).is_transient());

        let decode = ClientError::from(serde_json::from_str::<u32>("nope").unwrap_err());
        assert!(!decode.is_transient());
        assert!(!decode.is_auth_failure());
        assert_eq!(decode.status(), None);
    }

    #[test]
    fn test_timeout_error() {
        let err = ClientError::timeout(Duration::from_millis(1500));
        if let ClientError::Timeout { timeout_ms } = err {
            assert_eq!(timeout_ms, 1500);
        } else {
            panic!("Expected timeout error");
        }
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ClientError::from_status(401, "").to_string(),
            "Not authorized (HTTP 401)"
        );
        assert_eq!(
            ClientError::from_status(500, "boom").to_string(),
            "Server responded with HTTP 500"
        );
    }
}

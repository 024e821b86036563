use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    /// Transport failure: connection refused, DNS, timeout.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Non-2xx response (`status` set) or a GraphQL `errors` array (`status` absent).
    #[error("Upstream error{}: {message}", status_suffix(.status))]
    UpstreamError { status: Option<u16>, message: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status
        .map(|s| format!(" (HTTP {})", s))
        .unwrap_or_default()
}

impl AppError {
    pub fn upstream_status(status: u16, message: impl Into<String>) -> Self {
        AppError::UpstreamError {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn graphql(message: impl Into<String>) -> Self {
        AppError::UpstreamError {
            status: None,
            message: message.into(),
        }
    }

    /// HTTP 500 is the only status the metadata path retries on.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            AppError::UpstreamError {
                status: Some(500),
                ..
            }
        )
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::NetworkError("Request timeout".to_string())
        } else if err.is_connect() {
            AppError::NetworkError("Failed to connect to external service".to_string())
        } else if let Some(status) = err.status() {
            AppError::upstream_status(status.as_u16(), err.to_string())
        } else if err.is_decode() {
            AppError::ParseError(err.to_string())
        } else {
            AppError::NetworkError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::ConfigError(format!("Invalid number: {}", err))
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

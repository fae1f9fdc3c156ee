//! Error types for backend calls

use thiserror::Error;

/// Transport failure from a backend call
///
/// Callers treat every variant the same way; the split only makes log
/// lines more useful.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn network(msg: impl Into<String>) -> Self {
        ApiError::Network(msg.into())
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        ApiError::Timeout(msg.into())
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        ApiError::Status {
            status,
            body: body.into(),
        }
    }

    pub fn invalid_url(msg: impl Into<String>) -> Self {
        ApiError::InvalidUrl(msg.into())
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout(_))
    }
}

/// Result type alias for backend calls
pub type ApiResult<T> = Result<T, ApiError>;

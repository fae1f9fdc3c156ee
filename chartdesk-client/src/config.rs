//! Client configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Content type sent on every request unless the call overrides it
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Shared request configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Prefix for every request path. Empty means same-origin.
    #[serde(default)]
    pub base_url: String,
    /// Transport timeout for a whole request
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: default_timeout(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from environment variables
    ///
    /// Reads:
    /// - CHARTDESK_API_BASE_URL: base address (default empty)
    /// - CHARTDESK_API_TIMEOUT_SECS: timeout in seconds (default 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(base_url) = env::var("CHARTDESK_API_BASE_URL") {
            config.base_url = base_url;
        }

        if let Ok(raw) = env::var("CHARTDESK_API_TIMEOUT_SECS") {
            let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                field: "CHARTDESK_API_TIMEOUT_SECS".to_string(),
                value: raw.clone(),
            })?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "CHARTDESK_API_TIMEOUT_SECS".to_string(),
                    value: raw,
                });
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Join the base address with a request path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

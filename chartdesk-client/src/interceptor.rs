//! Request/response interceptors
//!
//! Every request built by [`crate::MarketClient`] passes through
//! [`Interceptor::on_request`] before it is sent, and every failure passes
//! through [`Interceptor::on_error`] exactly once before it is returned.
//! Successful responses are always unwrapped to their body by
//! [`unwrap_body`]; callers never see the transport envelope.

use chartdesk_core::{ApiError, ApiResult, ChartData};
use reqwest::{Request, StatusCode};
use tracing::error;

/// Hooks applied around every backend call
pub trait Interceptor: Send + Sync {
    /// Inspect or rewrite an outgoing request. Pass-through by default.
    fn on_request(&self, request: Request) -> ApiResult<Request> {
        Ok(request)
    }

    /// Observe a failed call
    fn on_error(&self, err: &ApiError) {
        error!("API Error: {}", err);
    }
}

/// Default interceptor: requests untouched, failures logged
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingInterceptor;

impl Interceptor for LoggingInterceptor {}

/// Reduce a response to its payload
///
/// Non-2xx statuses become [`ApiError::Status`]. An empty body is `Null`,
/// and a body that is not JSON is handed back as a string.
pub fn unwrap_body(status: StatusCode, body: &[u8]) -> ApiResult<ChartData> {
    if !status.is_success() {
        return Err(ApiError::status(
            status.as_u16(),
            String::from_utf8_lossy(body).into_owned(),
        ));
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ChartData::Null);
    }

    match serde_json::from_slice(body) {
        Ok(value) => Ok(value),
        Err(_) => Ok(ChartData::String(String::from_utf8_lossy(body).into_owned())),
    }
}

/// Classify a `reqwest` failure
pub fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::timeout(err.to_string())
    } else if err.is_builder() {
        ApiError::invalid_url(err.to_string())
    } else if let Some(status) = err.status() {
        ApiError::status(status.as_u16(), err.to_string())
    } else {
        ApiError::network(err.to_string())
    }
}

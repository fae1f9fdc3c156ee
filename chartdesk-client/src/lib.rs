//! HTTP client for the Chartdesk backend
//!
//! This crate wraps a `reqwest` client with the shared request
//! configuration and the interceptor hooks, and exposes the two backend
//! operations (chart data, file upload) through the [`MarketApi`] trait.

pub mod api;
pub mod client;
pub mod config;
pub mod interceptor;
pub mod types;

pub use api::MarketApi;
pub use client::MarketClient;
pub use config::{ClientConfig, ConfigError};
pub use interceptor::{Interceptor, LoggingInterceptor};
pub use types::{FormData, FormPart, UploadFile};

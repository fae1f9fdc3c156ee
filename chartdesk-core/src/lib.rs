//! Core types for the Chartdesk market chart client
//!
//! This crate defines the shared vocabulary used across the workspace:
//! market identifiers and their display titles, the route table that maps
//! view paths to markets, and the transport error type.

pub mod error;
pub mod market;
pub mod route;

pub use error::{ApiError, ApiResult};
pub use market::{market_title, ChartData, Market, DEFAULT_MARKET_TITLE};
pub use route::{resolve, Route, RouteMatch, ROUTES};

//! Reactive state held by the store

use chartdesk_core::{market_title, ChartData, Market};
use serde::Serialize;
use std::collections::HashMap;

/// Snapshot of everything a view can render from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketState {
    /// Selected market tag; not validated
    pub current_market: String,
    /// Last payload fetched per market tag
    pub chart_data: HashMap<String, ChartData>,
    /// True while a chart fetch is in flight (shared by all markets)
    pub loading: bool,
    /// Upload completion percentage; stays at zero until progress events exist
    pub upload_progress: u8,
}

impl Default for MarketState {
    fn default() -> Self {
        Self {
            current_market: Market::default().as_str().to_string(),
            chart_data: HashMap::new(),
            loading: false,
            upload_progress: 0,
        }
    }
}

impl MarketState {
    /// Display title derived from the selected market
    pub fn market_title(&self) -> &'static str {
        market_title(&self.current_market)
    }
}

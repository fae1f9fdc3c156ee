//! Market definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque chart payload as returned by the backend
pub type ChartData = serde_json::Value;

/// Title shown when the selected market is not one we know about
pub const DEFAULT_MARKET_TITLE: &str = "股票市场";

/// Supported markets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    /// Mainland China A-shares
    #[default]
    Cn,
    /// United States equities
    Us,
    /// Hong Kong equities
    Hk,
}

impl Market {
    pub const ALL: [Market; 3] = [Market::Cn, Market::Us, Market::Hk];

    /// Short tag used in URLs and as the chart cache key
    pub fn as_str(&self) -> &'static str {
        match self {
            Market::Cn => "cn",
            Market::Us => "us",
            Market::Hk => "hk",
        }
    }

    /// Get the full display name
    pub fn title(&self) -> &'static str {
        match self {
            Market::Cn => "中国A股市场",
            Market::Us => "美国股票市场",
            Market::Hk => "香港股票市场",
        }
    }

    /// Look up a market by its exact tag
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "cn" => Some(Market::Cn),
            "us" => Some(Market::Us),
            "hk" => Some(Market::Hk),
            _ => None,
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Market {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Market::from_id(s.to_lowercase().as_str()).ok_or_else(|| format!("Unknown market: {}", s))
    }
}

/// Display title for an arbitrary market tag, falling back to the generic label
pub fn market_title(id: &str) -> &'static str {
    match Market::from_id(id) {
        Some(market) => market.title(),
        None => DEFAULT_MARKET_TITLE,
    }
}

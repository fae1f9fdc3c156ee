//! Static route table for the market views

use crate::market::Market;
use serde::Serialize;

/// A view bound to a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub market: Market,
}

/// Where the root path sends the user
pub const ROOT_REDIRECT: &str = "/cn";

pub const ROUTES: [Route; 3] = [
    Route {
        path: "/cn",
        name: "ChinaMarket",
        market: Market::Cn,
    },
    Route {
        path: "/us",
        name: "USMarket",
        market: Market::Us,
    },
    Route {
        path: "/hk",
        name: "HKMarket",
        market: Market::Hk,
    },
];

/// Result of resolving a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: &'static Route,
    /// Set when the requested path was redirected
    pub redirected_from: Option<&'static str>,
}

/// Resolve a path to its view, following the root redirect
pub fn resolve(path: &str) -> Option<RouteMatch> {
    let trimmed = path.trim_end_matches('/');

    if trimmed.is_empty() {
        let route = find(ROOT_REDIRECT)?;
        return Some(RouteMatch {
            route,
            redirected_from: Some("/"),
        });
    }

    find(trimmed).map(|route| RouteMatch {
        route,
        redirected_from: None,
    })
}

fn find(path: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|r| r.path == path)
}

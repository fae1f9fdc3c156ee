//! Terminal rendering of a market view

use chartdesk_client::UploadFile;
use chartdesk_core::route::ROOT_REDIRECT;
use chartdesk_core::{resolve, ApiResult, ChartData, Route};
use chartdesk_store::{MarketState, MarketStore};
use std::fmt::Write as _;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

/// A resolved view bound to the shared store
pub struct MarketView {
    route: &'static Route,
    store: Arc<MarketStore>,
}

impl MarketView {
    /// Resolve `path` and select its market in the store
    pub fn open(path: &str, store: Arc<MarketStore>) -> anyhow::Result<Self> {
        let matched = resolve(path).ok_or_else(|| anyhow::anyhow!("No view for path: {}", path))?;

        if let Some(from) = matched.redirected_from {
            debug!("Redirecting {} -> {}", from, matched.route.path);
        }

        store.set_current_market(matched.route.market.as_str());

        Ok(Self {
            route: matched.route,
            store,
        })
    }

    pub fn route(&self) -> &'static Route {
        self.route
    }

    pub async fn load(&self) -> ApiResult<ChartData> {
        self.store
            .fetch_chart_data(self.route.market.as_str())
            .await
    }

    pub async fn upload(&self, file_type: &str, file: UploadFile) -> ApiResult<ChartData> {
        self.store
            .upload_file(self.route.market.as_str(), file_type, file)
            .await
    }

    pub fn render(&self) -> String {
        render(self.route, &self.store.snapshot())
    }
}

/// Log every state change until the store is dropped
pub fn watch_state(store: &MarketStore) -> JoinHandle<()> {
    let mut rx = store.subscribe();
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            debug!(
                market = %state.current_market,
                loading = state.loading,
                upload_progress = state.upload_progress,
                cached = state.chart_data.len(),
                "State changed"
            );
        }
    })
}

/// Render a view of the state for the given route
pub fn render(route: &Route, state: &MarketState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", state.market_title(), route.name);

    if state.loading {
        let _ = writeln!(out, "Loading...");
    }

    match state.chart_data.get(route.market.as_str()) {
        Some(data) => {
            let body = serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
            let _ = writeln!(out, "{}", body);
        }
        None => {
            let _ = writeln!(out, "No chart data");
        }
    }

    out
}

/// One line per route, root redirect first
pub fn render_routes() -> String {
    let mut out = format!("{:<4} -> {}\n", "/", ROOT_REDIRECT);
    for route in chartdesk_core::ROUTES.iter() {
        let _ = writeln!(out, "{:<4} {} [{}]", route.path, route.name, route.market.title());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartdesk_core::ROUTES;
    use serde_json::json;

    #[test]
    fn test_render_with_data() {
        let mut state = MarketState::default();
        state.current_market = "us".to_string();
        state
            .chart_data
            .insert("us".to_string(), json!({"close": [101.5]}));

        let out = render(&ROUTES[1], &state);
        assert!(out.starts_with("美国股票市场 (USMarket)"));
        assert!(out.contains("101.5"));
        assert!(!out.contains("Loading"));
    }

    #[test]
    fn test_render_without_data() {
        let mut state = MarketState::default();
        state.loading = true;

        let out = render(&ROUTES[0], &state);
        assert!(out.contains("Loading..."));
        assert!(out.contains("No chart data"));
    }

    #[test]
    fn test_render_routes_lists_all_views() {
        let out = render_routes();
        assert!(out.contains("/cn  ChinaMarket"));
        assert!(out.contains("/hk  HKMarket"));
        assert_eq!(out.lines().count(), 4);
    }
}

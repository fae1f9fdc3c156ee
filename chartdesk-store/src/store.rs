//! Market State Store
//!
//! Single source of truth for market selection, fetched chart data and the
//! loading/upload flags. Views read snapshots or subscribe for changes and
//! drive the store through its actions.
//!
//! The loading flag is shared by all markets. When two fetches overlap,
//! the first one to finish clears it while the other is still in flight.

use chartdesk_client::{FormData, MarketApi, UploadFile};
use chartdesk_core::{ApiResult, ChartData};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, instrument};

use crate::guard::{LoadingGuard, UploadGuard};
use crate::state::MarketState;

/// Market state store
pub struct MarketStore {
    api: Arc<dyn MarketApi>,
    state: watch::Sender<MarketState>,
}

impl MarketStore {
    /// Create a store backed by the given API
    pub fn new(api: Arc<dyn MarketApi>) -> Self {
        Self {
            api,
            state: watch::Sender::new(MarketState::default()),
        }
    }

    /// Receive a fresh snapshot after every state change
    pub fn subscribe(&self) -> watch::Receiver<MarketState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> MarketState {
        self.state.borrow().clone()
    }

    pub fn current_market(&self) -> String {
        self.state.borrow().current_market.clone()
    }

    /// Display title for the selected market, recomputed on every read
    pub fn market_title(&self) -> &'static str {
        self.state.borrow().market_title()
    }

    pub fn chart_data(&self, market: &str) -> Option<ChartData> {
        self.state.borrow().chart_data.get(market).cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn upload_progress(&self) -> u8 {
        self.state.borrow().upload_progress
    }

    /// Select a market. Unknown tags are accepted and only affect the title.
    pub fn set_current_market(&self, market: impl Into<String>) {
        let market = market.into();
        debug!("Selecting market: {}", market);
        self.state.send_modify(|s| s.current_market = market);
    }

    /// Fetch chart data for a market and cache it
    #[instrument(skip(self))]
    pub async fn fetch_chart_data(&self, market: &str) -> ApiResult<ChartData> {
        let _loading = LoadingGuard::acquire(&self.state);

        match self.api.get_chart_data(market).await {
            Ok(data) => {
                self.state.send_modify(|s| {
                    s.chart_data.insert(market.to_string(), data.clone());
                });
                debug!("Cached chart data for {}", market);
                Ok(data)
            }
            Err(e) => {
                error!("Failed to fetch chart data: {}", e);
                Err(e)
            }
        }
    }

    /// Upload a file, then refresh the market's chart data
    ///
    /// Returns the upload response only after the refresh has finished. A
    /// failed upload skips the refresh; a failed refresh fails the call.
    #[instrument(skip(self, file), fields(file_name = %file.file_name))]
    pub async fn upload_file(
        &self,
        market: &str,
        file_type: &str,
        file: UploadFile,
    ) -> ApiResult<ChartData> {
        let form = FormData::with_file(file);
        let _progress = UploadGuard::acquire(&self.state);

        let result = self.upload_and_refresh(market, file_type, form).await;

        if let Err(e) = &result {
            error!("File upload failed: {}", e);
        }

        result
    }

    async fn upload_and_refresh(
        &self,
        market: &str,
        file_type: &str,
        form: FormData,
    ) -> ApiResult<ChartData> {
        let uploaded = self.api.upload_file(market, file_type, form).await?;
        info!("Uploaded {} file for {}, refreshing chart data", file_type, market);

        self.fetch_chart_data(market).await?;
        Ok(uploaded)
    }
}

//! Backend operations used by the store

use async_trait::async_trait;
use chartdesk_core::{ApiResult, ChartData};

use crate::types::FormData;

/// The two calls the chart views depend on
#[async_trait]
pub trait MarketApi: Send + Sync {
    /// GET `/api/chart-data/{market}`
    async fn get_chart_data(&self, market: &str) -> ApiResult<ChartData>;

    /// POST `/upload/{market}/{file_type}` with a multipart body
    async fn upload_file(
        &self,
        market: &str,
        file_type: &str,
        form: FormData,
    ) -> ApiResult<ChartData>;
}

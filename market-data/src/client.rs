//! Bearer-authenticated REST client

use common::{AnalysisError, Deal, FetchStage, MarketSnapshot, TimeRange};
use tracing::{debug, warn};

use crate::wire::{MarketMetricsResponse, MarketTrendResponse, TopDealsResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.unleashnfts.com/api/v1";

/// Metric names accepted by the metrics and trend endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Volume,
    SalesCount,
    AveragePrice,
    UniqueBuyers,
}

impl Metric {
    pub fn query_name(&self) -> &'static str {
        match self {
            Metric::Volume => "volume",
            Metric::SalesCount => "sales_count",
            Metric::AveragePrice => "average_price",
            Metric::UniqueBuyers => "unique_buyers",
        }
    }
}

/// Time-series payload from the trend endpoint.
///
/// The pipeline only checks whether trend data came back; individual points
/// are kept as raw JSON.
#[derive(Debug, Clone, Default)]
pub struct TrendSeries {
    pub points: Vec<serde_json::Value>,
}

impl TrendSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Client for the NFT market-data REST API.
///
/// Constructed once at process start and passed to whichever component needs
/// it; there is no ambient global instance.
#[derive(Debug, Clone)]
pub struct MarketDataClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MarketDataClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Point the client at a different endpoint (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build a client from the `UNLEASHNFTS_API_KEY` environment variable
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("UNLEASHNFTS_API_KEY")
            .map_err(|_| anyhow::anyhow!("UNLEASHNFTS_API_KEY environment variable is required"))?;
        Ok(Self::new(api_key))
    }

    /// Fetch the highest-value recent sales, newest ordering as returned by
    /// the API.
    pub async fn top_deals(
        &self,
        limit: usize,
        time_range: &TimeRange,
    ) -> Result<Vec<Deal>, AnalysisError> {
        let mut params = vec![("limit", limit.to_string())];
        params.extend(time_range_params(time_range));

        let resp: TopDealsResponse = self
            .get(FetchStage::TopDeals, "/nfts/top_deals", &params)
            .await?;
        debug!(deals = resp.data.len(), "fetched top deals");
        Ok(resp.data)
    }

    /// Fetch aggregate market metrics for a time window
    pub async fn market_metrics(
        &self,
        metrics: &[Metric],
        time_range: &TimeRange,
        include_washtrade: bool,
    ) -> Result<MarketSnapshot, AnalysisError> {
        let mut params = metrics_params(metrics, time_range);
        params.push(("include_washtrade", include_washtrade.to_string()));

        let resp: MarketMetricsResponse = self
            .get(FetchStage::MarketMetrics, "/market/metrics", &params)
            .await?;
        Ok(resp.data)
    }

    /// Fetch trend series for a time window
    pub async fn market_trends(
        &self,
        metrics: &[Metric],
        time_range: &TimeRange,
    ) -> Result<TrendSeries, AnalysisError> {
        let params = metrics_params(metrics, time_range);

        let resp: MarketTrendResponse = self
            .get(FetchStage::MarketTrends, "/market/trend", &params)
            .await?;
        Ok(TrendSeries { points: resp.data })
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        stage: FetchStage,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, AnalysisError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, %stage, "market-data request");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(params)
            .send()
            .await
            .map_err(|e| AnalysisError::upstream(stage, None, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "market-data request rejected");
            return Err(AnalysisError::upstream(
                stage,
                Some(status.as_u16()),
                format!("HTTP {}", status),
            ));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AnalysisError::upstream(stage, Some(status.as_u16()), e.to_string()))
    }
}

/// Query parameters for a time range; custom ranges expand into explicit
/// start/end keys.
fn time_range_params(time_range: &TimeRange) -> Vec<(&'static str, String)> {
    let mut params = vec![("time_range", time_range.query_value().to_string())];
    if let TimeRange::Custom { start, end } = time_range {
        params.push(("time_range_start", start.to_rfc3339()));
        params.push(("time_range_end", end.to_rfc3339()));
    }
    params
}

/// Metric lists serialize as repeated `metrics` query keys
fn metrics_params(metrics: &[Metric], time_range: &TimeRange) -> Vec<(&'static str, String)> {
    let mut params: Vec<(&'static str, String)> = metrics
        .iter()
        .map(|m| ("metrics", m.query_name().to_string()))
        .collect();
    params.extend(time_range_params(time_range));
    params
}

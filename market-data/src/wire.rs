//! Response envelopes for the market-data API
//!
//! The API wraps every payload in a `{ "data": ... }` envelope. These types
//! stay private to the crate; the public surface returns `common` types.

use common::{Deal, MarketSnapshot};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct TopDealsResponse {
    #[serde(default)]
    pub data: Vec<Deal>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MarketMetricsResponse {
    pub data: MarketSnapshot,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MarketTrendResponse {
    // Trend points are consumed only for presence, not shape-analyzed.
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_top_deals_response() {
        let json = r#"{
            "data": [
                {"price": 42.5, "buyer_address": "0xaaa", "seller_address": "0xbbb"},
                {"buyer_address": "0xccc"}
            ]
        }"#;

        let resp: TopDealsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.data.len(), 2);
        assert_eq!(resp.data[0].price, 42.5);
        // Missing price defaults to 0 instead of failing the response.
        assert_eq!(resp.data[1].price, 0.0);
        assert!(resp.data[1].seller_address.is_none());
    }

    #[test]
    fn test_parse_market_metrics_response() {
        let json = r#"{
            "data": {
                "volume": 1250.75,
                "sales_count": 340,
                "average_price": 3.68,
                "unique_buyers": 290
            }
        }"#;

        let resp: MarketMetricsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.data.volume, 1250.75);
        assert_eq!(resp.data.sales_count, 340);
        assert_eq!(resp.data.unique_buyers, 290);
    }

    #[test]
    fn test_parse_empty_trend_response() {
        let resp: MarketTrendResponse = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(resp.data.is_empty());

        let resp: MarketTrendResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(resp.data.is_empty());
    }
}

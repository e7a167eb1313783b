//! Core data model for collection analysis

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Marketplace a collection reference was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Opensea,
    Blur,
    Looksrare,
    X2y2,
    Unknown,
}

/// Which resolver branch produced the topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractedFrom {
    Url,
    Contract,
    Name,
}

/// Canonical identity of an NFT collection, resolved from free-form input.
///
/// Immutable once produced; at least one of slug/address/name is set for any
/// non-empty input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionTopic {
    pub collection_slug: Option<String>,
    pub contract_address: Option<String>,
    pub collection_name: Option<String>,
    pub platform: Platform,
    pub extracted_from: ExtractedFrom,
}

impl CollectionTopic {
    /// Best human-readable label for report headers and log lines
    pub fn display_name(&self) -> &str {
        self.collection_name
            .as_deref()
            .or(self.collection_slug.as_deref())
            .or(self.contract_address.as_deref())
            .unwrap_or("Unknown Collection")
    }
}

/// A single top-deal transaction as returned by the market-data API.
///
/// Counterparty addresses are frequently missing upstream; a missing price is
/// treated as 0 rather than rejecting the whole response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub buyer_address: Option<String>,
    #[serde(default)]
    pub seller_address: Option<String>,
}

/// Aggregate market metrics for one time window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    #[serde(default)]
    pub volume: f64,
    #[serde(default)]
    pub sales_count: u64,
    #[serde(default)]
    pub average_price: f64,
    #[serde(default)]
    pub unique_buyers: u64,
}

/// Time window accepted by the market-data API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    #[serde(rename = "15m")]
    Minutes15,
    #[serde(rename = "30m")]
    Minutes30,
    #[serde(rename = "24h")]
    Hours24,
    #[serde(rename = "7d")]
    Days7,
    #[serde(rename = "30d")]
    Days30,
    #[serde(rename = "90d")]
    Days90,
    All,
    /// Explicit start/end timestamps, serialized as separate query parameters
    Custom {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl TimeRange {
    /// Value for the `time_range` query key
    pub fn query_value(&self) -> &'static str {
        match self {
            TimeRange::Minutes15 => "15m",
            TimeRange::Minutes30 => "30m",
            TimeRange::Hours24 => "24h",
            TimeRange::Days7 => "7d",
            TimeRange::Days30 => "30d",
            TimeRange::Days90 => "90d",
            TimeRange::All => "all",
            TimeRange::Custom { .. } => "range",
        }
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::Hours24
    }
}

/// Headline numbers surfaced alongside the trust score
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketHighlights {
    pub top_deal_price: Option<f64>,
    pub volume_24h: Option<f64>,
    pub floor_price: Option<f64>,
    pub total_sales: Option<usize>,
}

/// Output of the trust scorer: a clamped 0-100 score plus the signals that
/// moved it. Computed fresh per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustAssessment {
    pub trust_score: u8,
    pub red_flags: Vec<String>,
    pub positive_signals: Vec<String>,
    pub market_data: MarketHighlights,
}

/// Investment stance derived from the trust score.
///
/// `ProceedWithCaution` is deliberately the best attainable tier; there is no
/// plain "proceed" in this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    ProceedWithCaution,
    HighRisk,
    Avoid,
}

impl Recommendation {
    /// Pure mapping from a clamped trust score
    pub fn from_score(trust_score: u8) -> Self {
        if trust_score >= 70 {
            Recommendation::ProceedWithCaution
        } else if trust_score >= 40 {
            Recommendation::HighRisk
        } else {
            Recommendation::Avoid
        }
    }
}

/// Full analysis result for one collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionReport {
    pub collection: CollectionTopic,
    pub trust_score: u8,
    pub recommendation: Recommendation,
    pub red_flags: Vec<String>,
    pub positive_signals: Vec<String>,
    pub market_data: MarketHighlights,
    pub research_prompts: Vec<String>,
    pub report: String,
    pub timestamp: DateTime<Utc>,
}

/// Condensed result for the quick-analysis path
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickAssessment {
    pub name: String,
    pub trust_score: u8,
    pub recommendation: Recommendation,
    pub key_flags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_boundaries() {
        assert_eq!(
            Recommendation::from_score(70),
            Recommendation::ProceedWithCaution
        );
        assert_eq!(Recommendation::from_score(69), Recommendation::HighRisk);
        assert_eq!(Recommendation::from_score(40), Recommendation::HighRisk);
        assert_eq!(Recommendation::from_score(39), Recommendation::Avoid);
        assert_eq!(Recommendation::from_score(0), Recommendation::Avoid);
        assert_eq!(
            Recommendation::from_score(100),
            Recommendation::ProceedWithCaution
        );
    }

    #[test]
    fn test_recommendation_wire_names() {
        let json = serde_json::to_string(&Recommendation::ProceedWithCaution).unwrap();
        assert_eq!(json, "\"PROCEED_WITH_CAUTION\"");
        let json = serde_json::to_string(&Recommendation::HighRisk).unwrap();
        assert_eq!(json, "\"HIGH_RISK\"");
    }

    #[test]
    fn test_deal_missing_price_defaults_to_zero() {
        let deal: Deal = serde_json::from_str(r#"{"buyer_address": "0xabc"}"#).unwrap();
        assert_eq!(deal.price, 0.0);
        assert_eq!(deal.buyer_address.as_deref(), Some("0xabc"));
        assert!(deal.seller_address.is_none());
    }

    #[test]
    fn test_time_range_query_values() {
        assert_eq!(TimeRange::Hours24.query_value(), "24h");
        assert_eq!(TimeRange::All.query_value(), "all");
        let custom = TimeRange::Custom {
            start: Utc::now(),
            end: Utc::now(),
        };
        assert_eq!(custom.query_value(), "range");
    }

    #[test]
    fn test_display_name_fallback_order() {
        let mut topic = CollectionTopic {
            collection_slug: Some("cool-cats".to_string()),
            contract_address: Some("0x1a92f7381b9f03921564a437210bb9396471050c".to_string()),
            collection_name: None,
            platform: Platform::Opensea,
            extracted_from: ExtractedFrom::Url,
        };
        assert_eq!(topic.display_name(), "cool-cats");

        topic.collection_slug = None;
        assert_eq!(
            topic.display_name(),
            "0x1a92f7381b9f03921564a437210bb9396471050c"
        );

        topic.contract_address = None;
        assert_eq!(topic.display_name(), "Unknown Collection");
    }
}

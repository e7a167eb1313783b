//! Report generation
//!
//! Assembles the structured payload the report persona receives and, when a
//! text-generation client is available, asks it for prose. The payload shape
//! is part of the external contract with the report persona.

use chrono::{DateTime, Utc};
use common::{AnalysisError, CollectionTopic, Recommendation, TimeRange, TrustAssessment};
use serde_json::json;

use crate::agent::report_writer;
use crate::llm::TextGenClient;

/// Structured analysis payload for the report persona
pub fn report_payload(
    topic: &CollectionTopic,
    assessment: &TrustAssessment,
    time_range: &TimeRange,
    timestamp: DateTime<Utc>,
) -> serde_json::Value {
    json!({
        "collection": {
            "name": topic.display_name(),
            "slug": topic.collection_slug,
            "contractAddress": topic.contract_address,
            "platform": topic.platform,
        },
        "marketAnalysis": {
            "trustScore": assessment.trust_score,
            "redFlags": assessment.red_flags,
            "positiveSignals": assessment.positive_signals,
            "marketData": assessment.market_data,
        },
        "metadata": {
            "analysisTimestamp": timestamp.to_rfc3339(),
            "timeRange": time_range.query_value(),
        },
    })
}

/// Ask the report persona for investment-report prose
pub async fn generate_report(
    text_gen: &TextGenClient,
    payload: &serde_json::Value,
) -> Result<String, AnalysisError> {
    let prompt = format!(
        "Generate a comprehensive NFT investment report based on the following \
analysis data:\n\n{}\n\nPlease format this as a professional NFT investment \
analysis report with clear recommendations, risk assessment, and investment \
thesis.",
        serde_json::to_string_pretty(payload).unwrap_or_default()
    );
    text_gen.generate(&report_writer(), &prompt).await
}

/// Plain-text fallback when no text-generation client is configured.
///
/// Keeps the "report is a non-empty string" contract without a network call.
pub fn summary_report(
    topic: &CollectionTopic,
    assessment: &TrustAssessment,
    recommendation: Recommendation,
) -> String {
    let mut lines = vec![
        format!("NFT Analysis: {}", topic.display_name()),
        format!(
            "Trust score {}/100 - {:?}",
            assessment.trust_score, recommendation
        ),
    ];
    for flag in &assessment.red_flags {
        lines.push(format!("Red flag: {flag}"));
    }
    for signal in &assessment.positive_signals {
        lines.push(format!("Positive: {signal}"));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{ExtractedFrom, MarketHighlights, Platform};

    fn sample_topic() -> CollectionTopic {
        CollectionTopic {
            collection_slug: Some("bored-ape-yacht-club".to_string()),
            contract_address: None,
            collection_name: Some("bored ape yacht club".to_string()),
            platform: Platform::Opensea,
            extracted_from: ExtractedFrom::Url,
        }
    }

    fn sample_assessment() -> TrustAssessment {
        TrustAssessment {
            trust_score: 15,
            red_flags: vec!["Low buyer diversity - potential wash trading".to_string()],
            positive_signals: vec!["Healthy seller distribution".to_string()],
            market_data: MarketHighlights {
                top_deal_price: Some(1.0),
                volume_24h: None,
                floor_price: None,
                total_sales: Some(4),
            },
        }
    }

    #[test]
    fn test_payload_sections() {
        let payload = report_payload(
            &sample_topic(),
            &sample_assessment(),
            &TimeRange::Days7,
            Utc::now(),
        );

        assert_eq!(
            payload["collection"]["name"],
            json!("bored ape yacht club")
        );
        assert_eq!(payload["collection"]["platform"], json!("opensea"));
        assert_eq!(payload["marketAnalysis"]["trustScore"], json!(15));
        assert_eq!(
            payload["marketAnalysis"]["marketData"]["totalSales"],
            json!(4)
        );
        assert_eq!(payload["metadata"]["timeRange"], json!("7d"));
    }

    #[test]
    fn test_summary_report_is_never_empty() {
        let text = summary_report(
            &sample_topic(),
            &sample_assessment(),
            Recommendation::Avoid,
        );
        assert!(text.contains("15/100"));
        assert!(text.contains("Red flag:"));
        assert!(!text.trim().is_empty());
    }
}

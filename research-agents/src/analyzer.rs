//! The collection-analysis pipeline
//!
//! One request is single-threaded and request-scoped: resolve the topic,
//! fetch market data (the three fetches are independent and issued
//! concurrently), score, map the recommendation, and write the report.
//! Nothing is shared across requests and nothing is retried.

use std::time::Duration;

use chrono::Utc;
use common::{
    AnalysisError, CollectionReport, QuickAssessment, Recommendation, TimeRange, TrustAssessment,
};
use market_data::{MarketDataClient, Metric};
use serde::Deserialize;
use tracing::{debug, error, info};
use trust_scoring::{research_prompts, resolve_topic, score_deals};

use crate::agent::result_evaluator;
use crate::llm::TextGenClient;
use crate::report::{generate_report, report_payload, summary_report};
use crate::search::{is_new_result, SearchResult, WebSearchClient};

/// Deals requested per analysis window
pub const TOP_DEALS_LIMIT: usize = 20;

/// Fixed pause between batch items, a rate-limit policy constant rather than
/// adaptive backoff.
pub const BATCH_DELAY: Duration = Duration::from_secs(2);

const METRIC_SET: &[Metric] = &[
    Metric::Volume,
    Metric::SalesCount,
    Metric::AveragePrice,
    Metric::UniqueBuyers,
];

const TREND_METRICS: &[Metric] = &[Metric::Volume, Metric::SalesCount, Metric::AveragePrice];

/// Per-request analysis options
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub time_range: TimeRange,
    pub include_market_trends: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            time_range: TimeRange::Hours24,
            include_market_trends: true,
        }
    }
}

/// Drives resolve -> fetch -> score -> report for NFT collections.
///
/// Owns its clients; built once at process start and passed around by
/// reference. There is no ambient global client.
#[derive(Debug, Clone)]
pub struct Analyzer {
    market_data: MarketDataClient,
    text_gen: Option<TextGenClient>,
    web_search: Option<WebSearchClient>,
}

impl Analyzer {
    pub fn new(market_data: MarketDataClient) -> Self {
        Self {
            market_data,
            text_gen: None,
            web_search: None,
        }
    }

    /// Attach a text-generation client; without one, reports fall back to a
    /// deterministic plain-text summary.
    pub fn with_text_generation(mut self, client: TextGenClient) -> Self {
        self.text_gen = Some(client);
        self
    }

    pub fn with_web_search(mut self, client: WebSearchClient) -> Self {
        self.web_search = Some(client);
        self
    }

    /// Full analysis of a single collection reference
    pub async fn analyze(
        &self,
        input: &str,
        options: &AnalysisOptions,
    ) -> Result<CollectionReport, AnalysisError> {
        let (topic, assessment, has_trends) = self.assess(input, options).await?;

        let recommendation = Recommendation::from_score(assessment.trust_score);
        let prompts = research_prompts(&topic, &assessment, has_trends);
        let timestamp = Utc::now();

        let report = match &self.text_gen {
            Some(text_gen) => {
                let payload = report_payload(&topic, &assessment, &options.time_range, timestamp);
                generate_report(text_gen, &payload).await?
            }
            None => summary_report(&topic, &assessment, recommendation),
        };

        info!(
            collection = topic.display_name(),
            trust_score = assessment.trust_score,
            recommendation = ?recommendation,
            "analysis complete"
        );

        Ok(CollectionReport {
            collection: topic,
            trust_score: assessment.trust_score,
            recommendation,
            red_flags: assessment.red_flags,
            positive_signals: assessment.positive_signals,
            market_data: assessment.market_data,
            research_prompts: prompts,
            report,
            timestamp,
        })
    }

    /// Quick analysis: 24h window, no trends, no report prose
    pub async fn quick(&self, input: &str) -> Result<QuickAssessment, AnalysisError> {
        let options = AnalysisOptions {
            time_range: TimeRange::Hours24,
            include_market_trends: false,
        };
        let (topic, assessment, _) = self.assess(input, &options).await?;

        Ok(QuickAssessment {
            name: topic.display_name().to_string(),
            trust_score: assessment.trust_score,
            recommendation: Recommendation::from_score(assessment.trust_score),
            key_flags: key_flags(&assessment),
        })
    }

    /// Analyze collections strictly one after another, pausing [`BATCH_DELAY`]
    /// between items to respect upstream rate limits. Per-item failures are
    /// logged and skipped; the reduced result set is returned.
    pub async fn analyze_batch(
        &self,
        inputs: &[String],
        options: &AnalysisOptions,
    ) -> Vec<CollectionReport> {
        info!(collections = inputs.len(), "starting batch analysis");
        let mut reports = Vec::new();

        for (i, input) in inputs.iter().enumerate() {
            info!(item = i + 1, total = inputs.len(), %input, "batch item");
            match self.analyze(input, options).await {
                Ok(report) => reports.push(report),
                Err(e) => error!(%input, error = %e, "batch item failed, continuing"),
            }
            if i + 1 < inputs.len() {
                tokio::time::sleep(BATCH_DELAY).await;
            }
        }

        info!(
            analyzed = reports.len(),
            requested = inputs.len(),
            "batch analysis complete"
        );
        reports
    }

    /// Chase research prompts through the web-search client, deduplicating
    /// results by URL across queries. With a text-generation client attached,
    /// each fresh result is also judged for relevance by the evaluator
    /// persona and dropped when it fails.
    pub async fn research(
        &self,
        prompts: &[String],
        max_results_per_query: usize,
    ) -> Result<Vec<SearchResult>, AnalysisError> {
        let client = self.web_search.as_ref().ok_or_else(|| {
            AnalysisError::upstream(
                common::FetchStage::WebSearch,
                None,
                "web-search client not configured",
            )
        })?;

        let mut seen_urls: Vec<String> = Vec::new();
        let mut results = Vec::new();
        for prompt in prompts {
            for result in client.search(prompt, max_results_per_query).await? {
                if !is_new_result(&result, &seen_urls) {
                    continue;
                }
                seen_urls.push(result.url.clone());
                if let Some(text_gen) = &self.text_gen {
                    if !judge_relevance(text_gen, prompt, &result).await? {
                        continue;
                    }
                }
                results.push(result);
            }
        }
        Ok(results)
    }

    /// Resolve and score; shared by the full and quick paths
    async fn assess(
        &self,
        input: &str,
        options: &AnalysisOptions,
    ) -> Result<(common::CollectionTopic, TrustAssessment, bool), AnalysisError> {
        let topic = resolve_topic(input)?;
        info!(collection = topic.display_name(), "analyzing collection");

        // Independent fetches, no ordering between them. Any failure aborts
        // the request; partial scoring is never attempted.
        let deals_fut = self.market_data.top_deals(TOP_DEALS_LIMIT, &options.time_range);
        let metrics_fut =
            self.market_data
                .market_metrics(METRIC_SET, &options.time_range, false);
        let trends_fut = async {
            if options.include_market_trends {
                self.market_data
                    .market_trends(TREND_METRICS, &options.time_range)
                    .await
                    .map(Some)
            } else {
                Ok(None)
            }
        };

        let (deals, snapshot, trends) = tokio::join!(deals_fut, metrics_fut, trends_fut);
        let (deals, snapshot, trends) = (deals?, snapshot?, trends?);

        let assessment = score_deals(&deals, Some(&snapshot));
        Ok((topic, assessment, trends.is_some()))
    }
}

/// Evaluator verdict on a single search result
#[derive(Debug, Deserialize)]
struct RelevanceVerdict {
    #[serde(rename = "isRelevant")]
    is_relevant: bool,
    #[serde(default)]
    reason: String,
}

/// Ask the evaluator persona whether a result answers the query. A verdict
/// that fails to parse keeps the result rather than dropping it.
async fn judge_relevance(
    text_gen: &TextGenClient,
    query: &str,
    result: &SearchResult,
) -> Result<bool, AnalysisError> {
    let prompt = relevance_prompt(query, result);
    let reply = text_gen.generate(&result_evaluator(), &prompt).await?;
    match parse_relevance(&reply) {
        Some(verdict) => {
            if !verdict.is_relevant {
                debug!(url = %result.url, reason = %verdict.reason, "dropping irrelevant result");
            }
            Ok(verdict.is_relevant)
        }
        None => {
            debug!(url = %result.url, "unparseable relevance verdict, keeping result");
            Ok(true)
        }
    }
}

fn relevance_prompt(query: &str, result: &SearchResult) -> String {
    // Snippets are capped so long pages do not blow up the prompt.
    let snippet: String = result.content.chars().take(500).collect();
    format!(
        "Research query: {query}\n\n\
         Search result:\n\
         Title: {}\n\
         URL: {}\n\
         Content: {snippet}\n\n\
         Is this result relevant to the research query? Respond with a JSON \
         object containing `isRelevant` (boolean) and `reason` (a brief \
         explanation).",
        result.title, result.url
    )
}

/// The model sometimes wraps its JSON in a Markdown code fence.
fn parse_relevance(reply: &str) -> Option<RelevanceVerdict> {
    let body = reply
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();
    serde_json::from_str(body).ok()
}

/// Up to three headline flags, red flags first
fn key_flags(assessment: &TrustAssessment) -> Vec<String> {
    assessment
        .red_flags
        .iter()
        .chain(assessment.positive_signals.iter())
        .take(3)
        .cloned()
        .collect()
}

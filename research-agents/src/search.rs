//! Web-search client
//!
//! Thin POST wrapper over a search API, used to chase the research prompts
//! the scorer produces. Results already seen in a session are skipped by URL.

use common::{AnalysisError, FetchStage};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

/// A single search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

/// Client for the web-search API
#[derive(Debug, Clone)]
pub struct WebSearchClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WebSearchClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build a client from the `TAVILY_API_KEY` environment variable
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("TAVILY_API_KEY")
            .map_err(|_| anyhow::anyhow!("TAVILY_API_KEY environment variable is required"))?;
        Ok(Self::new(api_key))
    }

    /// Run one query; a single attempt, failure tagged as the web-search stage
    pub async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, AnalysisError> {
        let stage = FetchStage::WebSearch;
        let url = format!("{}/search", self.base_url);
        debug!(query, "web search");

        let request = SearchRequest {
            api_key: &self.api_key,
            query,
            max_results,
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalysisError::upstream(stage, None, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::upstream(
                stage,
                Some(status.as_u16()),
                format!("HTTP {}", status),
            ));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::upstream(stage, Some(status.as_u16()), e.to_string()))?;
        Ok(body.results)
    }
}

/// True when the result's URL has not been processed yet
pub fn is_new_result(result: &SearchResult, seen_urls: &[String]) -> bool {
    !seen_urls.iter().any(|u| u == &result.url)
}

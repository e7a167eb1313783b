//! Typed failures for the analysis pipeline
//!
//! Upstream calls are attempted exactly once; a failure carries which stage
//! broke so the caller can report it without guessing.

use std::fmt;

use thiserror::Error;

/// The upstream call that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    TopDeals,
    MarketMetrics,
    MarketTrends,
    TextGeneration,
    WebSearch,
}

impl fmt::Display for FetchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FetchStage::TopDeals => "top deals",
            FetchStage::MarketMetrics => "market metrics",
            FetchStage::MarketTrends => "market trends",
            FetchStage::TextGeneration => "text generation",
            FetchStage::WebSearch => "web search",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by the resolver, the clients, and the pipeline
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Input to the topic resolver was empty or whitespace
    #[error("input is empty; expected a URL, contract address, or collection name")]
    EmptyInput,

    /// An upstream HTTP call returned a non-success status or failed at the
    /// transport level. Never retried; partial scoring is not attempted.
    #[error("{stage} request failed: {message}")]
    Upstream {
        stage: FetchStage,
        status: Option<u16>,
        message: String,
    },

    /// The text-generation service returned an empty report body
    #[error("text generation returned an empty report")]
    EmptyReport,
}

impl AnalysisError {
    pub fn upstream(stage: FetchStage, status: Option<u16>, message: impl Into<String>) -> Self {
        AnalysisError::Upstream {
            stage,
            status,
            message: message.into(),
        }
    }

    /// Stage tag for upstream failures, `None` for local errors
    pub fn stage(&self) -> Option<FetchStage> {
        match self {
            AnalysisError::Upstream { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

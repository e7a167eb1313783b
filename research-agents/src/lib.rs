//! Research agents and the collection-analysis pipeline
//!
//! This crate ties the deterministic core to the outside world:
//! - agent personas and a text-generation client for report prose
//! - a thin web-search client for follow-up research
//! - the [`Analyzer`], which runs resolve -> fetch -> score -> report for a
//!   single collection, plus a quick variant and a rate-limited batch variant

pub mod agent;
pub mod analyzer;
pub mod llm;
pub mod report;
pub mod search;

pub use agent::{personas, AgentPersona};
pub use analyzer::{AnalysisOptions, Analyzer, BATCH_DELAY};
pub use llm::TextGenClient;
pub use search::{SearchResult, WebSearchClient};

// Re-export the shared model for convenience
pub use common::{CollectionReport, QuickAssessment, Recommendation, TrustAssessment};

//! Shared types for the NFT research pipeline
//!
//! Every workspace member speaks in these types: the topic resolver produces
//! a [`CollectionTopic`], the market-data client returns [`Deal`]s and a
//! [`MarketSnapshot`], and the scorer turns those into a [`TrustAssessment`].

mod error;
mod types;

pub use error::{AnalysisError, FetchStage};
pub use types::{
    CollectionReport, CollectionTopic, Deal, ExtractedFrom, MarketHighlights, MarketSnapshot,
    Platform, QuickAssessment, Recommendation, TimeRange, TrustAssessment,
};

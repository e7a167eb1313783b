//! Deterministic core of the NFT research pipeline
//!
//! Two pure components with no network surface of their own:
//! - the topic resolver, which turns free-form input (marketplace URL,
//!   contract address, or collection name) into a [`common::CollectionTopic`]
//! - the trust scorer, which turns a window of top deals plus optional
//!   aggregate metrics into a [`common::TrustAssessment`]
//!
//! Scoring the same inputs twice yields identical output; there is no hidden
//! state or randomness anywhere in this crate.

mod prompts;
mod scoring;
mod topic;

pub use prompts::research_prompts;
pub use scoring::score_deals;
pub use topic::resolve_topic;

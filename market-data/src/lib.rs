//! Thin HTTP client for the NFT market-data API
//!
//! Three read operations feed the analysis pipeline: top deals, aggregate
//! market metrics, and market trends. Each call is attempted exactly once
//! and a failure is surfaced as [`common::AnalysisError::Upstream`] tagged
//! with the stage that broke.

mod client;
mod wire;

pub use client::{MarketDataClient, Metric, TrendSeries, DEFAULT_BASE_URL};

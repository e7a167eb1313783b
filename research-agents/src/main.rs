use anyhow::Result;
use market_data::MarketDataClient;
use research_agents::{AnalysisOptions, Analyzer, TextGenClient, WebSearchClient};
use tracing::{info, warn, Level};
use tracing_subscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("🚀 Starting NFT collection research");

    // Clients are built once here and handed to the analyzer; credentials
    // come from the environment.
    let market_data = MarketDataClient::from_env()?;
    let mut analyzer = Analyzer::new(market_data);

    match TextGenClient::from_env() {
        Ok(client) => analyzer = analyzer.with_text_generation(client),
        Err(e) => warn!("{e}; reports fall back to plain-text summaries"),
    }
    if let Ok(client) = WebSearchClient::from_env() {
        analyzer = analyzer.with_web_search(client);
    }

    let mut inputs: Vec<String> = std::env::args().skip(1).collect();
    if inputs.is_empty() {
        inputs = vec![
            "Bored Ape Yacht Club".to_string(),
            "https://opensea.io/collection/cryptopunks".to_string(),
        ];
        info!("no collections given, analyzing the demo set");
    }

    let reports = analyzer
        .analyze_batch(&inputs, &AnalysisOptions::default())
        .await;

    for report in &reports {
        println!();
        println!("=== {} ===", report.collection.display_name());
        println!(
            "Trust score: {}/100 ({:?})",
            report.trust_score, report.recommendation
        );
        println!(
            "Red flags: {} | Positive signals: {}",
            report.red_flags.len(),
            report.positive_signals.len()
        );
        println!("{}", report.report);
    }

    info!(
        analyzed = reports.len(),
        requested = inputs.len(),
        "👋 Done"
    );
    Ok(())
}

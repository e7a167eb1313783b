//! Offline walkthrough of the deterministic core: resolve a few collection
//! references, score a canned deal window, and print what the pipeline would
//! report. No API keys needed.
//!
//! Run with: cargo run -p research-agents --example demo

use common::{Deal, MarketSnapshot, Recommendation};
use trust_scoring::{research_prompts, resolve_topic, score_deals};

fn deal(price: f64, buyer: &str, seller: &str) -> Deal {
    Deal {
        price,
        buyer_address: Some(buyer.to_string()),
        seller_address: Some(seller.to_string()),
    }
}

fn main() {
    for input in [
        "https://opensea.io/collection/bored-ape-yacht-club",
        "0xBC4CA0EdA7647A8aB7C2061c2E118A18a936f13D",
        "Cool Cats",
    ] {
        let topic = resolve_topic(input).expect("non-empty input");
        println!(
            "{input}\n  -> {} (platform {:?}, via {:?})",
            topic.display_name(),
            topic.platform,
            topic.extracted_from
        );
    }

    // A wash-trading-shaped window: one wallet buys everything.
    let suspicious = vec![
        deal(1.0, "0xaaa", "0x111"),
        deal(1.0, "0xaaa", "0x222"),
        deal(1.0, "0xaaa", "0x333"),
        deal(1.0, "0xaaa", "0x444"),
    ];
    let snapshot = MarketSnapshot {
        volume: 420.5,
        sales_count: 4,
        average_price: 1.0,
        unique_buyers: 1,
    };

    let topic = resolve_topic("Suspicious Apes").unwrap();
    let assessment = score_deals(&suspicious, Some(&snapshot));
    let recommendation = Recommendation::from_score(assessment.trust_score);

    println!(
        "\n{}: trust score {}/100 -> {:?}",
        topic.display_name(),
        assessment.trust_score,
        recommendation
    );
    for flag in &assessment.red_flags {
        println!("  red flag: {flag}");
    }
    for signal in &assessment.positive_signals {
        println!("  positive: {signal}");
    }

    println!("\nresearch prompts:");
    for prompt in research_prompts(&topic, &assessment, false) {
        println!("  - {prompt}");
    }
}

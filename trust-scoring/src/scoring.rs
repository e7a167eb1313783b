//! Trust scorer: wash-trading heuristics over a window of top deals
//!
//! Single pass, pure, deterministic. Starts from a baseline of 50 and applies
//! independent additive adjustments for buyer/seller diversity, trade volume,
//! price outliers, and repeat-wallet activity, then clamps to [0, 100].

use std::collections::HashMap;

use common::{Deal, MarketHighlights, MarketSnapshot, TrustAssessment};
use tracing::debug;

const BASE_SCORE: i32 = 50;

/// Score a window of top deals, optionally enriched with aggregate metrics.
///
/// An empty deal list is not an error: the score stays at the baseline and no
/// flags are emitted. Counterparty addresses may be missing per deal; the
/// diversity checks only consider deals where the address is present, and
/// skip entirely when none are.
pub fn score_deals(deals: &[Deal], snapshot: Option<&MarketSnapshot>) -> TrustAssessment {
    let mut score = BASE_SCORE;
    let mut red_flags = Vec::new();
    let mut positive_signals = Vec::new();
    let mut market_data = MarketHighlights::default();

    if !deals.is_empty() {
        let prices: Vec<f64> = deals.iter().map(|d| d.price).collect();
        let buyers: Vec<&str> = deals
            .iter()
            .filter_map(|d| d.buyer_address.as_deref())
            .collect();
        let sellers: Vec<&str> = deals
            .iter()
            .filter_map(|d| d.seller_address.as_deref())
            .collect();

        let top_price = prices.iter().cloned().fold(f64::MIN, f64::max);
        market_data.top_deal_price = Some(top_price);
        market_data.total_sales = Some(deals.len());

        let buyer_diversity = diversity(&buyers);
        let seller_diversity = diversity(&sellers);

        if !buyers.is_empty() {
            if buyer_diversity > 0.8 {
                score += 15;
                positive_signals
                    .push("High buyer diversity - low wash trading risk".to_string());
            }
            if buyer_diversity < 0.3 {
                score -= 25;
                red_flags.push("Low buyer diversity - potential wash trading".to_string());
            }
        }

        if !sellers.is_empty() {
            if seller_diversity > 0.7 {
                score += 10;
                positive_signals.push("Healthy seller distribution".to_string());
            }
            if seller_diversity < 0.2 {
                score -= 15;
                red_flags
                    .push("Concentrated seller activity - potential manipulation".to_string());
            }
        }

        if deals.len() > 10 {
            score += 10;
            positive_signals.push(format!("Active trading volume ({} sales)", deals.len()));
        }

        let avg_price: f64 = prices.iter().sum::<f64>() / prices.len() as f64;
        if top_price > avg_price * 5.0 {
            score -= 10;
            red_flags.push("Extreme price outliers detected".to_string());
        }

        if let Some((wallet, purchases)) = busiest_buyer(&buyers) {
            if purchases > 3 {
                score -= 20;
                red_flags.push(format!(
                    "Single wallet {} made {} purchases - suspicious activity",
                    wallet, purchases
                ));
            }
        }

        debug!(
            deals = deals.len(),
            buyer_diversity, seller_diversity, score, "scored deal window"
        );
    }

    if let Some(snapshot) = snapshot {
        market_data.volume_24h = Some(snapshot.volume);
        market_data.floor_price = Some(snapshot.average_price);
    }

    TrustAssessment {
        trust_score: score.clamp(0, 100) as u8,
        red_flags,
        positive_signals,
        market_data,
    }
}

/// Distinct addresses over addresses present. Explicitly 0 for an empty
/// list rather than a division by zero.
fn diversity(addresses: &[&str]) -> f64 {
    if addresses.is_empty() {
        return 0.0;
    }
    let mut distinct: Vec<&str> = addresses.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    distinct.len() as f64 / addresses.len() as f64
}

/// Wallet with the most purchases in the window. Ties resolve to the wallet
/// seen first so repeated scoring of the same list is stable.
fn busiest_buyer<'a>(buyers: &[&'a str]) -> Option<(&'a str, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for &buyer in buyers {
        *counts.entry(buyer).or_insert(0) += 1;
    }

    let mut best: Option<(&'a str, usize)> = None;
    for &buyer in buyers {
        let count = counts[buyer];
        if best.map_or(true, |(_, n)| count > n) {
            best = Some((buyer, count));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(price: f64, buyer: Option<&str>, seller: Option<&str>) -> Deal {
        Deal {
            price,
            buyer_address: buyer.map(str::to_string),
            seller_address: seller.map(str::to_string),
        }
    }

    #[test]
    fn test_empty_deal_list_stays_at_baseline() {
        let assessment = score_deals(&[], None);
        assert_eq!(assessment.trust_score, 50);
        assert!(assessment.red_flags.is_empty());
        assert!(assessment.positive_signals.is_empty());
        assert!(assessment.market_data.top_deal_price.is_none());
        assert!(assessment.market_data.total_sales.is_none());
    }

    #[test]
    fn test_no_addresses_means_no_diversity_flags() {
        // No buyer or seller information at all: exactly 50, no flags in
        // either direction.
        let deals: Vec<Deal> = (0..5).map(|_| deal(1.0, None, None)).collect();
        let assessment = score_deals(&deals, None);
        assert_eq!(assessment.trust_score, 50);
        assert!(assessment.red_flags.is_empty());
        assert!(assessment.positive_signals.is_empty());
    }

    #[test]
    fn test_wash_trading_scenario() {
        // buyerDiversity = 0.25 (< 0.3, -25), sellerDiversity = 1.0 (> 0.7,
        // +10), one wallet with 4 purchases (-20): 50 - 25 + 10 - 20 = 15.
        let deals = vec![
            deal(1.0, Some("A"), Some("X")),
            deal(1.0, Some("A"), Some("Y")),
            deal(1.0, Some("A"), Some("Z")),
            deal(1.0, Some("A"), Some("W")),
        ];
        let assessment = score_deals(&deals, None);
        assert_eq!(assessment.trust_score, 15);
        assert_eq!(assessment.red_flags.len(), 2);
        assert_eq!(assessment.positive_signals.len(), 1);
        assert!(assessment.red_flags[1].contains('A'));
        assert!(assessment.red_flags[1].contains('4'));
        assert_eq!(
            common::Recommendation::from_score(assessment.trust_score),
            common::Recommendation::Avoid
        );
    }

    #[test]
    fn test_healthy_market_scores_high() {
        // 12 deals, every counterparty unique: +15 +10 +10 = 85.
        let deals: Vec<Deal> = (0..12)
            .map(|i| {
                deal(
                    1.0,
                    Some(&format!("buyer-{i}")),
                    Some(&format!("seller-{i}")),
                )
            })
            .collect();
        let assessment = score_deals(&deals, None);
        assert_eq!(assessment.trust_score, 85);
        assert!(assessment.red_flags.is_empty());
        assert_eq!(assessment.positive_signals.len(), 3);
        assert!(assessment.positive_signals[2].contains("12 sales"));
    }

    #[test]
    fn test_score_clamps_at_zero() {
        // Every red flag at once on a big single-wallet window; the raw sum
        // goes below zero and must clamp.
        let mut deals: Vec<Deal> = (0..11).map(|_| deal(1.0, Some("A"), Some("X"))).collect();
        deals.push(deal(100.0, Some("A"), Some("X")));
        let assessment = score_deals(&deals, None);
        // -25 -15 -10 -20 +10 (count) = -10 before clamping.
        assert_eq!(assessment.trust_score, 0);
    }

    #[test]
    fn test_price_outlier_flag() {
        // Five floor sales and one 50x spike: mean ~9.17, max > 5x mean.
        let mut deals: Vec<Deal> = (0..5)
            .map(|i| {
                deal(
                    1.0,
                    Some(&format!("buyer-{i}")),
                    Some(&format!("seller-{i}")),
                )
            })
            .collect();
        deals.push(deal(50.0, Some("buyer-5"), Some("seller-5")));

        let assessment = score_deals(&deals, None);
        assert!(assessment
            .red_flags
            .iter()
            .any(|f| f.contains("price outliers")));
        // +15 buyer diversity, +10 seller distribution, -10 outlier.
        assert_eq!(assessment.trust_score, 65);
        assert_eq!(assessment.market_data.top_deal_price, Some(50.0));
        assert_eq!(assessment.market_data.total_sales, Some(6));
    }

    #[test]
    fn test_snapshot_populates_highlights() {
        let snapshot = MarketSnapshot {
            volume: 1234.5,
            sales_count: 100,
            average_price: 2.5,
            unique_buyers: 80,
        };
        let assessment = score_deals(&[], Some(&snapshot));
        assert_eq!(assessment.trust_score, 50);
        assert_eq!(assessment.market_data.volume_24h, Some(1234.5));
        assert_eq!(assessment.market_data.floor_price, Some(2.5));
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let deals = vec![
            deal(2.0, Some("a"), Some("x")),
            deal(3.0, Some("a"), Some("x")),
            deal(9.0, Some("b"), None),
            deal(1.0, None, Some("y")),
        ];
        let snapshot = MarketSnapshot {
            volume: 10.0,
            sales_count: 4,
            average_price: 3.75,
            unique_buyers: 2,
        };
        let first = score_deals(&deals, Some(&snapshot));
        let second = score_deals(&deals, Some(&snapshot));
        assert_eq!(first, second);
    }

    #[test]
    fn test_busiest_buyer_tie_takes_first_seen() {
        let buyers = vec!["b", "a", "b", "a"];
        let (wallet, count) = busiest_buyer(&buyers).unwrap();
        assert_eq!(count, 2);
        assert_eq!(wallet, "b");
    }
}

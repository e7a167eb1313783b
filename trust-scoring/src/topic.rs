//! Topic resolver: free-form input to a canonical collection identity
//!
//! Classification order: marketplace URL, then bare contract address, then
//! human-readable name. The resolver is total for non-empty input; an
//! unrecognized URL still resolves, just with nothing extracted.

use common::{AnalysisError, CollectionTopic, ExtractedFrom, Platform};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    // Input is lowercased before matching, so plain [a-f0-9] covers
    // mixed-case hex.
    static ref OPENSEA_COLLECTION: Regex =
        Regex::new(r"opensea\.io/collection/([^/?]+)").unwrap();
    static ref OPENSEA_ASSET: Regex =
        Regex::new(r"opensea\.io/assets/ethereum/(0x[a-f0-9]{40})").unwrap();
    static ref BLUR_COLLECTION: Regex =
        Regex::new(r"blur\.io/collection/([^/?]+)").unwrap();
    static ref LOOKSRARE_COLLECTION: Regex =
        Regex::new(r"looksrare\.org/collections/(0x[a-f0-9]{40})").unwrap();
    static ref X2Y2_COLLECTION: Regex =
        Regex::new(r"x2y2\.io/collection/(0x[a-f0-9]{40})").unwrap();
    static ref CONTRACT_ADDRESS: Regex = Regex::new(r"^0x[a-f0-9]{40}$").unwrap();
}

/// Resolve a URL, contract address, or collection name into a
/// [`CollectionTopic`]. Fails only on empty input.
pub fn resolve_topic(input: &str) -> Result<CollectionTopic, AnalysisError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let clean = trimmed.to_lowercase();

    let mut topic = CollectionTopic {
        collection_slug: None,
        contract_address: None,
        collection_name: None,
        platform: Platform::Unknown,
        extracted_from: ExtractedFrom::Name,
    };

    if clean.starts_with("http") || clean.contains('.') {
        topic.extracted_from = ExtractedFrom::Url;

        if clean.contains("opensea.io") {
            topic.platform = Platform::Opensea;
            if let Some(caps) = OPENSEA_COLLECTION.captures(&clean) {
                topic.collection_slug = Some(caps[1].to_string());
            }
            if let Some(caps) = OPENSEA_ASSET.captures(&clean) {
                topic.contract_address = Some(caps[1].to_string());
            }
        } else if clean.contains("blur.io") {
            topic.platform = Platform::Blur;
            if let Some(caps) = BLUR_COLLECTION.captures(&clean) {
                topic.collection_slug = Some(caps[1].to_string());
            }
        } else if clean.contains("looksrare.org") {
            topic.platform = Platform::Looksrare;
            if let Some(caps) = LOOKSRARE_COLLECTION.captures(&clean) {
                topic.contract_address = Some(caps[1].to_string());
            }
        } else if clean.contains("x2y2.io") {
            topic.platform = Platform::X2y2;
            if let Some(caps) = X2Y2_COLLECTION.captures(&clean) {
                topic.contract_address = Some(caps[1].to_string());
            }
        }
    } else if CONTRACT_ADDRESS.is_match(&clean) {
        topic.extracted_from = ExtractedFrom::Contract;
        topic.contract_address = Some(clean.clone());
    } else {
        topic.collection_name = Some(trimmed.to_string());
        topic.collection_slug = Some(slugify(trimmed));
    }

    // Derive a display name when only a slug was extracted.
    if topic.collection_name.is_none() {
        if let Some(slug) = &topic.collection_slug {
            topic.collection_name = Some(slug.replace('-', " "));
        }
    }

    debug!(
        input = trimmed,
        from = ?topic.extracted_from,
        platform = ?topic.platform,
        "resolved collection topic"
    );

    Ok(topic)
}

/// Lowercase, strip everything but alphanumerics and spaces, collapse
/// whitespace runs into hyphens.
fn slugify(name: &str) -> String {
    let cleaned: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join("-")
}

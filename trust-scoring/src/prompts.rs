//! Research prompt templating
//!
//! Deterministic follow-up questions handed to the research personas. The
//! base set always applies; wash-trading questions are added when the scorer
//! raised red flags, and market-context questions when trend data came back.

use common::{CollectionTopic, TrustAssessment};

/// Build the research question list for one analyzed collection
pub fn research_prompts(
    topic: &CollectionTopic,
    assessment: &TrustAssessment,
    has_trends: bool,
) -> Vec<String> {
    let name = topic
        .collection_slug
        .as_deref()
        .or(topic.contract_address.as_deref())
        .unwrap_or("this NFT collection");

    let mut prompts = vec![
        format!("Who is the team behind {name} and what is their track record?"),
        format!("What is the community sentiment around {name} on Twitter and Discord?"),
        format!("What utility or roadmap does {name} offer to holders?"),
        format!("Are there any red flags or controversies surrounding {name}?"),
    ];

    if !assessment.red_flags.is_empty() {
        prompts.push(format!(
            "Is {name} involved in wash trading or market manipulation?"
        ));
        prompts.push(format!(
            "What do NFT analysts say about {name}'s trading patterns?"
        ));
    }

    if has_trends {
        prompts.push(format!(
            "How does {name} compare to overall NFT market trends?"
        ));
        prompts.push(format!(
            "What factors are driving {name}'s recent price action?"
        ));
    }

    prompts
}

//! Agent personas
//!
//! Each persona is a named system prompt bound to a model. Personas hold no
//! state of their own; the [`crate::TextGenClient`] does the talking.

use serde::Serialize;

/// A specialist persona: identity plus the system prompt that shapes it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentPersona {
    pub id: &'static str,
    pub name: &'static str,
    pub model: &'static str,
    pub instructions: &'static str,
}

const DEFAULT_MODEL: &str = "mistral-large-latest";

/// Writes the final investment report from structured analysis data
pub fn report_writer() -> AgentPersona {
    AgentPersona {
        id: "report-agent",
        name: "Report Agent",
        model: DEFAULT_MODEL,
        instructions: "\
You are an expert researcher and analyst writing for a highly experienced \
reader. Be highly organized, accurate, and thorough; detail is welcome and \
mistakes erode trust. Flag speculation explicitly. Use Markdown formatting.

When given NFT analysis data, produce an investment-focused report with: an \
executive summary stating the trust score and recommendation \
(PROCEED_WITH_CAUTION / HIGH_RISK / AVOID), a market analysis section \
covering trading metrics and wash-trading indicators, a risk assessment \
listing red flags and positive signals, and a bull/bear case. Close with a \
disclaimer that this is not financial advice.",
    }
}

/// Judges whether a search result is relevant to a research question
pub fn result_evaluator() -> AgentPersona {
    AgentPersona {
        id: "evaluation-agent",
        name: "Evaluation Agent",
        model: DEFAULT_MODEL,
        instructions: "\
You evaluate search results for relevance to a research query. Given the \
query and a result's title, URL, and content snippet, respond with a JSON \
object containing `isRelevant` (boolean) and `reason` (a brief explanation). \
Be strict: tangential matches are not relevant.",
    }
}

/// All registered personas
pub fn personas() -> Vec<AgentPersona> {
    vec![report_writer(), result_evaluator()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_ids_are_unique() {
        let personas = personas();
        let mut ids: Vec<&str> = personas.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), personas.len());
    }

    #[test]
    fn test_personas_have_instructions() {
        for persona in personas() {
            assert!(!persona.instructions.is_empty(), "{} is blank", persona.id);
            assert!(!persona.model.is_empty());
        }
    }
}

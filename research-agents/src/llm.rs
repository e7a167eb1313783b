//! Text-generation client
//!
//! Talks to an OpenAI-compatible chat-completions endpoint (Mistral by
//! default). The pipeline treats it as an opaque service: structured JSON in,
//! prose out, with no contract on the output beyond "non-empty".

use common::{AnalysisError, FetchStage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::agent::AgentPersona;

pub const DEFAULT_BASE_URL: &str = "https://api.mistral.ai/v1";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: String,
}

/// Chat-completions client for report and evaluation personas
#[derive(Debug, Clone)]
pub struct TextGenClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TextGenClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build a client from `MISTRAL_API_KEY` (and optional `MISTRAL_BASE_URL`)
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("MISTRAL_API_KEY")
            .map_err(|_| anyhow::anyhow!("MISTRAL_API_KEY environment variable is required"))?;
        let mut client = Self::new(api_key);
        if let Ok(base_url) = std::env::var("MISTRAL_BASE_URL") {
            client.base_url = base_url;
        }
        Ok(client)
    }

    /// Run one prompt through a persona and return the generated text.
    ///
    /// One attempt; an empty completion is an error, not a silent blank
    /// report.
    pub async fn generate(
        &self,
        persona: &AgentPersona,
        prompt: &str,
    ) -> Result<String, AnalysisError> {
        let stage = FetchStage::TextGeneration;
        let url = format!("{}/chat/completions", self.base_url);
        debug!(persona = persona.id, model = persona.model, "text-generation request");

        let request = ChatRequest {
            model: persona.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: persona.instructions,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalysisError::upstream(stage, None, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::upstream(
                stage,
                Some(status.as_u16()),
                format!("HTTP {}", status),
            ));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::upstream(stage, Some(status.as_u16()), e.to_string()))?;

        completion_text(body)
    }
}

/// First choice's content, with a blank completion rejected rather than
/// passed along as a silently empty report.
fn completion_text(body: ChatResponse) -> Result<String, AnalysisError> {
    let text = body
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AnalysisError::EmptyReport);
    }
    Ok(text)
}

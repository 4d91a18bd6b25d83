//! Assistant bridge
//!
//! Relays one user utterance to the hosted model API and returns the first
//! text block of the reply. Each call is independent: no conversation
//! history, no streaming. Failures come back as explicit error values and
//! the caller decides about fallback, so "fallback used" is observable
//! rather than an incidental side effect of swallowed errors.

use serde::{Deserialize, Serialize};

use crate::config::AssistantConfig;

const DEFAULT_API_BASE: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";

/// Fixed travel-domain system prompt sent with every completion
const TRAVEL_SYSTEM_PROMPT: &str = "\
You are an AI travel assistant for Wanderhub. You help users plan trips, \
find destinations, and get personalized travel recommendations.

Your expertise includes:
- Destination recommendations based on interests, budget, and travel style
- Trip planning and itinerary suggestions
- Travel tips and best practices
- Seasonal travel advice
- Budget optimization
- Cultural insights and local recommendations

Be friendly, helpful, and enthusiastic about travel. Provide specific, \
actionable recommendations when possible. If recommending destinations, \
mention why they match the user's criteria.

Keep responses concise but informative. Use bullet points and headers for \
readability when appropriate.";

/// Errors surfaced by the assistant bridge
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// No model API key configured; no network call was attempted
    #[error("No model API key configured")]
    NotConfigured,

    /// Transport-level failure
    #[error("Model request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The model API answered with a non-success status
    #[error("Model API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The reply carried no text-typed content block
    #[error("Model reply contained no text block")]
    EmptyReply,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Request/response relay to the hosted model API
pub struct AssistantService {
    http: reqwest::Client,
    config: AssistantConfig,
    api_base: String,
}

impl AssistantService {
    pub fn new(config: AssistantConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Point the bridge at a different API host (tests)
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    /// Whether a live model call is possible at all
    pub fn enabled(&self) -> bool {
        self.config.enabled()
    }

    /// One completion for one user message.
    ///
    /// Returns `NotConfigured` without touching the network when no API
    /// key is present. Any other failure is an error value for the caller
    /// to substitute with the canned responder.
    pub async fn ask(&self, message: &str) -> Result<String, AssistantError> {
        if !self.enabled() {
            return Err(AssistantError::NotConfigured);
        }

        let request = CompletionRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            system: TRAVEL_SYSTEM_PROMPT,
            messages: [Message {
                role: "user",
                content: message,
            }],
        };

        let response = self
            .http
            .post(format!("{}/v1/messages", self.api_base))
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AssistantError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: CompletionResponse = response.json().await?;
        completion
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .ok_or(AssistantError::EmptyReply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ask_without_key_skips_network() {
        let service = AssistantService::new(AssistantConfig::default())
            // Unroutable host: reaching it would fail loudly, proving the
            // call short-circuits before any I/O
            .with_api_base("http://127.0.0.1:1");
        let result = service.ask("hello").await;
        assert!(matches!(result, Err(AssistantError::NotConfigured)));
    }

    #[test]
    fn test_completion_response_extracts_first_text_block() {
        let payload = r#"{
            "content": [
                { "type": "thinking" },
                { "type": "text", "text": "Go to Bali." },
                { "type": "text", "text": "second" }
            ]
        }"#;
        let completion: CompletionResponse = serde_json::from_str(payload).unwrap();
        let text = completion
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .unwrap();
        assert_eq!(text, "Go to Bali.");
    }

    #[test]
    fn test_request_shape() {
        let request = CompletionRequest {
            model: "test-model",
            max_tokens: 256,
            system: TRAVEL_SYSTEM_PROMPT,
            messages: [Message {
                role: "user",
                content: "hi",
            }],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "test-model");
        assert_eq!(value["max_tokens"], 256);
        assert_eq!(value["messages"][0]["role"], "user");
        assert!(value["system"].as_str().unwrap().contains("travel assistant"));
    }
}

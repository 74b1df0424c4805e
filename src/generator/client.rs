//! Text-completion endpoint abstraction and the Gemini REST client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::{CompletionError, GeneratorError};

/// Minimal capability the generator needs from a remote model.
///
/// This abstraction allows replacing the network call in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one instruction and one user message, returning the model text.
    async fn complete(
        &self,
        system_instruction: &str,
        user_message: &str,
        deadline: Duration,
    ) -> Result<String, CompletionError>;
}

/// Client for the Gemini `generateContent` REST API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Build a client from the generator config.
    ///
    /// Fails with `MissingCredential` when no API key is configured.
    pub fn new(config: &GeneratorConfig) -> Result<Self, GeneratorError> {
        let api_key = config
            .credential()
            .ok_or(GeneratorError::MissingCredential)?
            .to_string();

        let http = reqwest::Client::builder()
            .user_agent(concat!("commitgen/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(config.timeout)
            .build()
            .map_err(|e| GeneratorError::EndpointInit(CompletionError::Request(e)))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }

    async fn send(
        &self,
        request: &GenerateContentRequest<'_>,
    ) -> Result<String, CompletionError> {
        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(CompletionError::Request)?;

        let status = response.status();
        let body = response.text().await.map_err(CompletionError::Request)?;

        if !status.is_success() {
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        Ok(parsed.text())
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(
        &self,
        system_instruction: &str,
        user_message: &str,
        deadline: Duration,
    ) -> Result<String, CompletionError> {
        let request = GenerateContentRequest::new(system_instruction, user_message);
        debug!(model = %self.model, "sending generateContent request");

        timeout(deadline, self.send(&request))
            .await
            .map_err(|_| CompletionError::Timeout(deadline))?
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(system_instruction: &'a str, user_message: &'a str) -> Self {
        Self {
            system_instruction: Content::user(system_instruction),
            contents: vec![Content::user(user_message)],
            generation_config: GenerationConfig {
                // Thinking is disabled to keep latency low.
                thinking_config: ThinkingConfig {
                    include_thoughts: false,
                    thinking_budget: 0,
                },
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

impl<'a> Content<'a> {
    fn user(text: &'a str) -> Self {
        Self {
            role: "user",
            parts: vec![Part { text }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    include_thoughts: bool,
    thinking_budget: i32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, skipping thought parts.
    ///
    /// Empty when the response has no candidate text.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter(|p| !p.thought)
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_disables_thinking() {
        let request = GenerateContentRequest::new("be terse", "Recent git log:\n");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "systemInstruction": {"role": "user", "parts": [{"text": "be terse"}]},
                "contents": [{"role": "user", "parts": [{"text": "Recent git log:\n"}]}],
                "generationConfig": {
                    "thinkingConfig": {"includeThoughts": false, "thinkingBudget": 0}
                }
            })
        );
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"role": "model", "parts": [
                    {"text": "feat(cli): add flag"},
                    {"text": "\n\nBody text"}
                ]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(response.text(), "feat(cli): add flag\n\nBody text");
    }

    #[test]
    fn response_text_skips_thoughts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [
                {"text": "thinking...", "thought": true},
                {"text": "fix: typo"}
            ]}}]
        }))
        .unwrap();
        assert_eq!(response.text(), "fix: typo");
    }

    #[test]
    fn response_without_candidates_is_empty_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.text(), "");

        let response: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap();
        assert_eq!(response.text(), "");
    }

    #[test]
    fn new_requires_credential() {
        let err = GeminiClient::new(&GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, GeneratorError::MissingCredential));
    }

    #[test]
    fn url_targets_model_generate_content() {
        let config = GeneratorConfig::default()
            .with_api_key("key")
            .with_model("gemini-test")
            .with_endpoint("http://localhost:9999/");
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(
            client.url(),
            "http://localhost:9999/v1beta/models/gemini-test:generateContent"
        );
    }
}

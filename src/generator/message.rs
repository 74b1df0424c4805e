//! Commit message generation from a repository context.

use tokio::time::timeout;
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::{CompletionError, GeneratorError};
use crate::git::RepositoryContext;

use super::client::{CompletionClient, GeminiClient};
use super::prompt::{MessageStyle, build_prompt};

/// Turns a [`RepositoryContext`] into a commit message with one remote call.
///
/// The style (and so the system instruction) is fixed at construction.
pub struct MessageGenerator<C = GeminiClient> {
    client: Option<C>,
    config: GeneratorConfig,
    style: MessageStyle,
}

impl MessageGenerator<GeminiClient> {
    /// Create a generator backed by the Gemini API.
    ///
    /// Fails with `MissingCredential` when the config has no API key and
    /// with `EndpointInit` when the HTTP client cannot be built.
    pub fn new(config: GeneratorConfig, style: MessageStyle) -> Result<Self, GeneratorError> {
        let client = GeminiClient::new(&config)?;
        Ok(Self::with_client(config, style, client))
    }
}

impl<C: CompletionClient> MessageGenerator<C> {
    /// Create a generator around an existing completion client.
    pub fn with_client(config: GeneratorConfig, style: MessageStyle, client: C) -> Self {
        Self {
            client: Some(client),
            config,
            style,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn style(&self) -> MessageStyle {
        self.style
    }

    pub fn system_instruction(&self) -> &'static str {
        self.style.system_instruction()
    }

    pub fn is_closed(&self) -> bool {
        self.client.is_none()
    }

    /// Generate a commit message for `context`.
    ///
    /// Makes a single attempt bounded by the configured timeout and returns
    /// the model's text unchanged.
    pub async fn generate(&self, context: &RepositoryContext) -> Result<String, GeneratorError> {
        let client = self
            .client
            .as_ref()
            .ok_or(GeneratorError::EndpointCall(CompletionError::Closed))?;

        let prompt = build_prompt(context);
        let deadline = self.config.timeout;
        debug!(
            "Commit prompt length: {} chars, history: {}, style: {:?}",
            prompt.len(),
            context.has_history(),
            self.style
        );

        timeout(
            deadline,
            client.complete(self.system_instruction(), &prompt, deadline),
        )
        .await
        .map_err(|_| GeneratorError::EndpointCall(CompletionError::Timeout(deadline)))?
        .map_err(GeneratorError::EndpointCall)
    }

    /// Release the completion client. Safe to call more than once.
    pub fn close(&mut self) {
        if self.client.take().is_some() {
            debug!("Closed generation client");
        }
    }
}

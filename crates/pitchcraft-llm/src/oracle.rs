//! Oracle - `complete(prompt) -> text`
//!
//! Stages own their prompt templates; the oracle only ships one prompt as a
//! single user message and hands back the raw completion text.

use crate::completion::CompletionRequest;
use crate::error::Result;
use crate::message::Message;
use crate::provider::LlmProvider;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Text-to-text oracle shared by every pipeline stage
#[derive(Clone)]
pub struct Oracle {
    provider: Arc<dyn LlmProvider>,
    model: Option<String>,
    temperature: Option<f32>,
}

impl Oracle {
    /// Create an oracle that uses the provider's default model
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            model: None,
            temperature: None,
        }
    }

    /// Pin the model used for every call
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the sampling temperature used for every call
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Name of the backing provider
    #[must_use]
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Model that calls will be sent to
    #[must_use]
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    /// Send one prompt and return the completion text unmodified.
    #[instrument(skip(self, prompt), fields(provider = %self.provider.name(), prompt_len = prompt.len()))]
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let mut request =
            CompletionRequest::new(self.model().to_string()).with_message(Message::user(prompt));
        request.temperature = self.temperature;

        let response = self.provider.complete(request).await?;
        debug!(chars = response.content.len(), "oracle replied");
        Ok(response.content)
    }
}

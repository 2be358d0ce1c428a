//! Mock LLM Provider for testing
//!
//! Replies come from a FIFO queue first, then from an optional responder
//! closure, and finally fall back to a fixed "mock response". Every prompt
//! that reaches the provider is recorded.

use crate::completion::{CompletionRequest, CompletionResponse};
use crate::error::{Error, Result};
use crate::provider::LlmProvider;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

type Responder = Arc<dyn Fn(&str) -> String + Send + Sync>;

enum Reply {
    Text(String),
    Fail(String),
}

/// A mock LLM provider that returns queued or computed responses.
pub struct MockProvider {
    replies: Mutex<VecDeque<Reply>>,
    responder: Option<Responder>,
    prompts: Mutex<Vec<String>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Create a new mock provider.
    #[must_use]
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            responder: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Compute replies from the prompt text once the queue is drained.
    #[must_use]
    pub fn with_responder<F>(mut self, responder: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.responder = Some(Arc::new(responder));
        self
    }

    /// Queue a text reply.
    pub fn push_reply(&self, reply: impl Into<String>) {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Reply::Text(reply.into()));
    }

    /// Queue a failure; the call consuming it returns `Error::Api`.
    pub fn push_error(&self, message: impl Into<String>) {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Reply::Fail(message.into()));
    }

    /// Prompts received so far, in call order.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of completions requested so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait::async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let prompt = request.last_user_text().unwrap_or_default().to_string();
        self.prompts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(prompt.clone());

        let queued = self
            .replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();

        let content = match queued {
            Some(Reply::Text(text)) => text,
            Some(Reply::Fail(message)) => return Err(Error::Api(message)),
            None => match &self.responder {
                Some(responder) => responder(&prompt),
                None => "mock response".to_string(),
            },
        };

        Ok(CompletionResponse {
            content,
            usage: None,
            finish_reason: Some("stop".to_string()),
            model: "mock-model".to_string(),
        })
    }
}

//! Workflow wrapper
//!
//! Gives every agent the same calling convention: a message list goes in,
//! the agent runs once on the last message, and its answer comes back
//! appended as an assistant message.

use crate::agents::Agent;
use crate::error::{Error, Result};
use pitchcraft_llm::Message;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Messages of one invocation: the request, then the response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowState {
    /// Messages in order
    pub messages: Vec<Message>,
}

impl WorkflowState {
    /// State holding a single user request
    #[must_use]
    pub fn new(request: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(request)],
        }
    }

    /// Most recent message
    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Text of the most recent message
    #[must_use]
    pub fn last_text(&self) -> Option<&str> {
        self.last().map(|m| m.content.as_str())
    }
}

/// Single-node workflow around one agent
#[derive(Clone)]
pub struct Workflow {
    agent: Arc<dyn Agent>,
}

impl Workflow {
    /// Wrap an agent
    #[must_use]
    pub fn new(agent: Arc<dyn Agent>) -> Self {
        Self { agent }
    }

    /// Name of the wrapped agent
    #[must_use]
    pub fn agent_name(&self) -> &str {
        self.agent.name()
    }

    /// Run the agent on the last message and append its answer
    ///
    /// # Errors
    /// `Error::EmptyState` for a state with no messages; otherwise whatever
    /// the agent returned. On error the state is dropped unchanged.
    #[instrument(skip(self, state), fields(agent = %self.agent.name(), messages = state.messages.len()))]
    pub async fn invoke(&self, mut state: WorkflowState) -> Result<WorkflowState> {
        let input = state.last_text().ok_or(Error::EmptyState)?;
        let output = self.agent.run(input).await?;
        debug!(chars = output.len(), "agent responded");

        state.messages.push(Message::assistant(output));
        Ok(state)
    }

    /// Invoke on a fresh state and return the response text
    pub async fn run(&self, request: &str) -> Result<String> {
        let state = self.invoke(WorkflowState::new(request)).await?;
        state
            .messages
            .into_iter()
            .last()
            .map(|m| m.content)
            .ok_or(Error::EmptyState)
    }
}

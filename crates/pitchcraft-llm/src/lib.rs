//! Pitchcraft LLM - the oracle boundary
//!
//! Every pipeline stage treats the language model as a plain
//! text-to-text function. This crate provides:
//! - `LlmProvider`: provider trait (chat completion)
//! - `Oracle`: `complete(prompt) -> text` over any provider
//! - `OpenAiProvider`: OpenAI-compatible endpoint via async-openai
//! - `MockProvider`: scripted provider for deterministic tests

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod completion;
pub mod error;
pub mod message;
pub mod mock;
pub mod oracle;
pub mod provider;
pub mod providers;
pub mod util;

pub use completion::{CompletionRequest, CompletionResponse, TokenUsage};
pub use error::{Error, Result};
pub use message::{Message, MessageRole};
pub use mock::MockProvider;
pub use oracle::Oracle;
pub use provider::LlmProvider;
pub use providers::openai::{OpenAiConfig, OpenAiProvider};

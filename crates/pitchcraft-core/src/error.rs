//! Error types for pitchcraft-core

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Oracle failure, passed through untouched
    #[error("llm error: {0}")]
    Llm(#[from] pitchcraft_llm::Error),

    /// Store failure (schema, query, guard), passed through untouched
    #[error("store error: {0}")]
    Store(#[from] pitchcraft_store::Error),

    /// Rate table failed validation
    #[error("invalid rate table: {0}")]
    InvalidRateTable(String),

    /// A workflow was invoked without any message to act on
    #[error("workflow state has no messages")]
    EmptyState,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Messages suitable for showing to the person who asked
pub trait UserFriendlyError {
    /// What went wrong, in plain words
    fn user_message(&self) -> String;

    /// What the user can do about it
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for Error {
    fn user_message(&self) -> String {
        match self {
            Error::Llm(pitchcraft_llm::Error::NotConfigured(what)) => {
                format!("The language model is not configured: {what}")
            }
            Error::Llm(e) => format!("The language model call failed: {e}"),
            Error::Store(pitchcraft_store::Error::Schema { table, available }) => format!(
                "The leads database has no '{table}' table (found: {}).",
                if available.is_empty() {
                    "none".to_string()
                } else {
                    available.join(", ")
                }
            ),
            Error::Store(e) if e.is_query_failure() => {
                format!("The generated query could not be run: {e}")
            }
            Error::Store(e) => format!("The leads database is unavailable: {e}"),
            Error::InvalidRateTable(msg) => format!("The rate table is invalid: {msg}"),
            Error::EmptyState => "There was no request to process.".to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            Error::Llm(pitchcraft_llm::Error::NotConfigured(_)) => {
                Some("Set OPENAI_API_KEY (and optionally OPENAI_MODEL / OPENAI_BASE_URL).".to_string())
            }
            Error::Store(pitchcraft_store::Error::Schema { .. }) => {
                Some("Run `pitchcraft seed` to create and populate the database.".to_string())
            }
            Error::InvalidRateTable(_) => None,
            _ => Some("Please try again with a different request.".to_string()),
        }
    }
}

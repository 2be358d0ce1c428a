//! Error types for pitchcraft-store

use thiserror::Error;

/// Store error type
#[derive(Debug, Error)]
pub enum Error {
    /// Required table is missing (raised once, when the store is opened)
    #[error("table '{table}' not found in database. Available tables: {available:?}")]
    Schema {
        /// Table that was expected
        table: String,
        /// Tables that do exist
        available: Vec<String>,
    },

    /// The engine rejected the query (syntax, unknown column, engine fault)
    #[error("query failed: {0}")]
    Query(String),

    /// The query guard refused to run the query
    #[error("query rejected: {0}")]
    Rejected(String),

    /// Connection or filesystem failure
    #[error("database error: {0}")]
    Database(String),

    /// A column value could not be decoded
    #[error("decode error: {0}")]
    Decode(String),
}

impl Error {
    /// Whether this is a query-time failure (as opposed to setup)
    #[must_use]
    pub fn is_query_failure(&self) -> bool {
        matches!(self, Self::Query(_) | Self::Rejected(_) | Self::Decode(_))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

//! Agents
//!
//! An agent turns one request string into one response string. Agents are
//! composed by holding other agents behind `Arc<dyn ...>`, which is also how
//! tests swap in recording doubles.

mod data_query;
mod estimation;
mod proposal;

pub use data_query::{DataQueryAgent, LIST_ALL_SQL, SEARCH_SQL};
pub use estimation::EstimationAgent;
pub use proposal::ProposalAgent;

use crate::error::Result;
use async_trait::async_trait;

/// A request/response pipeline
#[async_trait]
pub trait Agent: Send + Sync {
    /// Short name used in logs and the command surface
    fn name(&self) -> &str;

    /// Run the pipeline once
    async fn run(&self, input: &str) -> Result<String>;
}

/// An agent that can also answer the two canned lead queries
#[async_trait]
pub trait LeadDirectory: Agent {
    /// Every lead, ordered by ascending id
    async fn list_all(&self) -> Result<String>;

    /// Leads whose company or needs contain `term`, case-insensitively
    async fn search_by_term(&self, term: &str) -> Result<String>;
}

//! Pitchcraft Core - orchestration of the sales agents
//!
//! Three agents share one oracle and one lead store:
//!
//! ```text
//! DataQueryAgent   request ─▶ synthesize SQL ─▶ store ─▶ format
//! EstimationAgent  requirements ─▶ breakdown ─▶ estimate
//! ProposalAgent    request ─▶ lead id ─▶ DataQueryAgent ─▶ EstimationAgent
//!                          ─▶ CostCalculator ─▶ proposal document
//! ```
//!
//! Every pipeline is a straight line: each stage consumes the previous
//! stage's single output, nothing is retried, and the first failure ends
//! the run. `Workflow` gives all three agents the same message-in,
//! message-out calling convention.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod agents;
pub mod error;
pub mod prompts;
pub mod rates;
pub mod stages;
pub mod workflow;

pub use agents::{Agent, DataQueryAgent, EstimationAgent, LeadDirectory, ProposalAgent};
pub use error::{Error, Result, UserFriendlyError};
pub use rates::{RateTable, RoleRate};
pub use stages::{
    CostCalculator, QueryIntent, QuerySynthesizer, ResultFormatter, SynthesizedQuery,
};
pub use workflow::{Workflow, WorkflowState};

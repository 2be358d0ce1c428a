//! Proposal composition
//!
//! ```text
//! request ─▶ extract id ─▶ lead lookup ─▶ technical report ─▶ costs ─▶ proposal
//! ```
//!
//! Each step feeds the next; the first failure stops the run.

use super::{Agent, DataQueryAgent, EstimationAgent, LeadDirectory};
use crate::error::Result;
use crate::prompts;
use crate::rates::RateTable;
use crate::stages::CostCalculator;
use async_trait::async_trait;
use pitchcraft_llm::Oracle;
use pitchcraft_store::LeadStore;
use std::sync::Arc;
use tracing::{info, instrument};

/// Builds a full sales proposal for one lead
pub struct ProposalAgent {
    oracle: Oracle,
    leads: Arc<dyn LeadDirectory>,
    estimator: Arc<dyn Agent>,
    costs: CostCalculator,
}

impl ProposalAgent {
    /// Assemble from explicit collaborators
    #[must_use]
    pub fn new(
        oracle: Oracle,
        leads: Arc<dyn LeadDirectory>,
        estimator: Arc<dyn Agent>,
        costs: CostCalculator,
    ) -> Self {
        Self {
            oracle,
            leads,
            estimator,
            costs,
        }
    }

    /// Wire the standard data-query and estimation agents around one oracle
    #[must_use]
    pub fn with_store(oracle: Oracle, store: LeadStore, rates: RateTable) -> Self {
        let leads = Arc::new(DataQueryAgent::new(store, oracle.clone()));
        let estimator = Arc::new(EstimationAgent::new(oracle.clone()));
        let costs = CostCalculator::new(oracle.clone(), rates);
        Self::new(oracle, leads, estimator, costs)
    }

    /// Every lead, as formatted listing text
    pub async fn list_leads(&self) -> Result<String> {
        self.leads.list_all().await
    }

    /// Leads matching `term`, as formatted listing text
    pub async fn search_leads(&self, term: &str) -> Result<String> {
        self.leads.search_by_term(term).await
    }

    /// Ask the oracle which lead the request is about. The trimmed reply is
    /// used verbatim.
    pub async fn extract_lead_id(&self, request: &str) -> Result<String> {
        let reply = self.oracle.complete(&prompts::lead_id_prompt(request)).await?;
        Ok(reply.trim().to_string())
    }
}

#[async_trait]
impl Agent for ProposalAgent {
    fn name(&self) -> &str {
        "proposal"
    }

    #[instrument(skip(self, input), fields(agent = "proposal"))]
    async fn run(&self, input: &str) -> Result<String> {
        let lead_id = self.extract_lead_id(input).await?;
        info!(stage = "extract", lead_id = %lead_id, "lead id extracted");

        let details = self.leads.run(&prompts::lead_details_request(&lead_id)).await?;
        info!(stage = "lookup", chars = details.len(), "lead details fetched");

        let technical = self.estimator.run(&details).await?;
        info!(stage = "estimate", chars = technical.len(), "technical report ready");

        let costs = self.costs.calculate(&technical).await?;
        info!(stage = "costs", chars = costs.len(), "cost breakdown ready");

        let proposal = self
            .oracle
            .complete(&prompts::proposal_prompt(&details, &technical, &costs))
            .await?;
        info!(stage = "assemble", chars = proposal.len(), "proposal assembled");

        Ok(proposal)
    }
}

#[cfg(test)]
mod tests;

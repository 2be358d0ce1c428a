//! Technical estimation: requirements to plan to effort estimate

use super::Agent;
use crate::error::Result;
use crate::prompts;
use async_trait::async_trait;
use pitchcraft_llm::Oracle;
use tracing::{info, instrument};

/// Two-stage estimator. The estimate stage sees the full plan text; both
/// outputs are returned verbatim under their own headings.
#[derive(Clone)]
pub struct EstimationAgent {
    oracle: Oracle,
}

impl EstimationAgent {
    /// Create an estimator
    #[must_use]
    pub fn new(oracle: Oracle) -> Self {
        Self { oracle }
    }

    /// Stage A: four-section project plan
    pub async fn analyze_requirements(&self, requirements: &str) -> Result<String> {
        Ok(self
            .oracle
            .complete(&prompts::breakdown_prompt(requirements))
            .await?)
    }

    /// Stage B: headcount, phase durations, man-days and risks
    pub async fn estimate_effort(&self, plan: &str) -> Result<String> {
        Ok(self.oracle.complete(&prompts::estimate_prompt(plan)).await?)
    }
}

#[async_trait]
impl Agent for EstimationAgent {
    fn name(&self) -> &str {
        "engineer"
    }

    #[instrument(skip(self, input), fields(agent = "engineer"))]
    async fn run(&self, input: &str) -> Result<String> {
        let plan = self.analyze_requirements(input).await?;
        info!(stage = "breakdown", chars = plan.len(), "plan ready");

        let estimate = self.estimate_effort(&plan).await?;
        info!(stage = "estimate", chars = estimate.len(), "estimate ready");

        Ok(prompts::compose_report(&plan, &estimate))
    }
}

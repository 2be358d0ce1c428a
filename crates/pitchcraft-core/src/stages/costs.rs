//! Cost calculation against the rate table

use crate::error::Result;
use crate::prompts;
use crate::rates::RateTable;
use pitchcraft_llm::Oracle;
use tracing::{debug, instrument};

/// Prices a technical report with one oracle call.
///
/// The rate table is embedded verbatim in the prompt. The arithmetic is
/// left to the model and the reply is returned as-is.
#[derive(Clone)]
pub struct CostCalculator {
    oracle: Oracle,
    rates: RateTable,
}

impl CostCalculator {
    /// Create a calculator over the given rates
    #[must_use]
    pub fn new(oracle: Oracle, rates: RateTable) -> Self {
        Self { oracle, rates }
    }

    /// Rates this calculator quotes against
    #[must_use]
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Prompt sent for `spec`
    #[must_use]
    pub fn prompt(&self, spec: &str) -> String {
        prompts::cost_prompt(spec, &self.rates)
    }

    /// Produce an itemized cost breakdown for a technical report
    #[instrument(skip(self, spec), fields(spec_len = spec.len()))]
    pub async fn calculate(&self, spec: &str) -> Result<String> {
        let breakdown = self.oracle.complete(&self.prompt(spec)).await?;
        debug!(chars = breakdown.len(), "cost breakdown ready");
        Ok(breakdown)
    }
}

//! Data-query agent: request to SQL to rows to answer

use super::{Agent, LeadDirectory};
use crate::error::Result;
use crate::prompts;
use crate::stages::{QueryIntent, QuerySynthesizer, ResultFormatter, SynthesizedQuery};
use async_trait::async_trait;
use pitchcraft_llm::Oracle;
use pitchcraft_store::LeadStore;
use tracing::{info, instrument};

/// Canned listing of every lead
pub const LIST_ALL_SQL: &str =
    "SELECT id, customer_name, company, needs FROM sales_leads ORDER BY id ASC";

/// Canned case-insensitive search; bind the term twice
pub const SEARCH_SQL: &str = "SELECT id, customer_name, company, needs FROM sales_leads \
     WHERE LOWER(company) LIKE '%' || LOWER(?) || '%' \
     OR LOWER(needs) LIKE '%' || LOWER(?) || '%' \
     ORDER BY id ASC";

/// Answers questions about the leads table
#[derive(Clone)]
pub struct DataQueryAgent {
    store: LeadStore,
    synthesizer: QuerySynthesizer,
    formatter: ResultFormatter,
}

impl DataQueryAgent {
    /// Create an agent over `store`
    #[must_use]
    pub fn new(store: LeadStore, oracle: Oracle) -> Self {
        Self {
            store,
            synthesizer: QuerySynthesizer::new(oracle.clone()),
            formatter: ResultFormatter::new(oracle),
        }
    }

    /// Store this agent reads from
    #[must_use]
    pub fn store(&self) -> &LeadStore {
        &self.store
    }

    /// Execute an already synthesized query and format the rows
    pub async fn answer(&self, query: &SynthesizedQuery, request: &str) -> Result<String> {
        let result = self.store.execute(&query.sql).await?;
        info!(rows = result.len(), intent = %query.intent, "query executed");
        self.formatter.format(&result, query.intent, request).await
    }
}

#[async_trait]
impl Agent for DataQueryAgent {
    fn name(&self) -> &str {
        "lead"
    }

    #[instrument(skip(self, input), fields(agent = "lead"))]
    async fn run(&self, input: &str) -> Result<String> {
        let query = self.synthesizer.synthesize(input).await?;
        self.answer(&query, input).await
    }
}

#[async_trait]
impl LeadDirectory for DataQueryAgent {
    async fn list_all(&self) -> Result<String> {
        let query = SynthesizedQuery::new(LIST_ALL_SQL, QueryIntent::Listing);
        self.answer(&query, prompts::LIST_ALL_REQUEST).await
    }

    #[instrument(skip(self))]
    async fn search_by_term(&self, term: &str) -> Result<String> {
        let result = self.store.execute_bound(SEARCH_SQL, &[term, term]).await?;
        info!(rows = result.len(), "search executed");
        self.formatter
            .format(&result, QueryIntent::Search, &prompts::search_request(term))
            .await
    }
}

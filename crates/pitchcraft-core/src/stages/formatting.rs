//! Result formatting: result set plus request to presentable text

use super::synthesis::QueryIntent;
use crate::error::Result;
use crate::prompts;
use pitchcraft_llm::Oracle;
use pitchcraft_store::ResultSet;
use tracing::{debug, instrument, warn};

const ID_COLUMN: &str = "id";
const DISPLAY_COLUMNS: [&str; 2] = ["company", "needs"];

/// One `#<id>: <field> - <field>` line per row.
///
/// Uses company and needs when present, otherwise the first two
/// non-identifier columns. Returns `None` when there is no `id` column.
#[must_use]
pub fn listing_lines(result: &ResultSet) -> Option<Vec<String>> {
    let id_idx = result.column_index(ID_COLUMN)?;

    let display: Vec<usize> = if DISPLAY_COLUMNS.iter().all(|c| result.has_column(c)) {
        DISPLAY_COLUMNS
            .iter()
            .filter_map(|c| result.column_index(c))
            .collect()
    } else {
        (0..result.columns.len())
            .filter(|&i| i != id_idx)
            .take(2)
            .collect()
    };

    let lines = result
        .rows
        .iter()
        .map(|row| {
            let cell = |i: usize| row.get(i).map(ToString::to_string).unwrap_or_default();
            let fields: Vec<String> = display.iter().map(|&i| cell(i)).collect();
            if fields.is_empty() {
                format!("#{}", cell(id_idx))
            } else {
                format!("#{}: {}", cell(id_idx), fields.join(" - "))
            }
        })
        .collect();

    Some(lines)
}

/// Turns a result set into the final answer with one oracle call
#[derive(Clone)]
pub struct ResultFormatter {
    oracle: Oracle,
}

impl ResultFormatter {
    /// Create a formatter
    #[must_use]
    pub fn new(oracle: Oracle) -> Self {
        Self { oracle }
    }

    /// Build the formatting prompt for a result.
    ///
    /// Listing and search intents get the per-lead line template; a search
    /// also states its match count. A listing-intent result without an `id`
    /// column is summarized instead.
    #[must_use]
    pub fn prompt(&self, result: &ResultSet, intent: QueryIntent, request: &str) -> String {
        let table = result.render_table();

        if intent.is_row_listing() {
            let lines = if result.is_empty() {
                Some(Vec::new())
            } else {
                listing_lines(result)
            };

            match lines {
                Some(lines) => {
                    let total = (intent == QueryIntent::Search).then_some(result.len());
                    return prompts::listing_prompt(request, &table, &lines, total);
                }
                None => warn!(%intent, columns = ?result.columns, "no id column, summarizing instead"),
            }
        }

        prompts::summary_prompt(request, &table)
    }

    /// Format `result` as the answer to `request`
    #[instrument(skip(self, result, request), fields(rows = result.len(), intent = %intent))]
    pub async fn format(&self, result: &ResultSet, intent: QueryIntent, request: &str) -> Result<String> {
        let prompt = self.prompt(result, intent, request);
        let text = self.oracle.complete(&prompt).await?;
        debug!(chars = text.len(), "result formatted");
        Ok(text)
    }
}

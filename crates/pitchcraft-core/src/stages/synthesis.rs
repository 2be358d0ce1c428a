//! Query synthesis: natural-language request to SQL plus intent

use crate::error::Result;
use crate::prompts::{self, INTENT_MARKER};
use pitchcraft_llm::Oracle;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

const AGGREGATE_FUNCTIONS: &[&str] = &["COUNT", "SUM", "AVG", "MIN", "MAX", "TOTAL", "GROUP_CONCAT"];

/// What kind of answer a query produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryIntent {
    /// Lead rows, one line each
    Listing,
    /// Lead rows matching a term, with a match count
    Search,
    /// Computed figures, summarized in prose
    Aggregate,
}

impl QueryIntent {
    /// Tag used in the `-- intent:` line
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Listing => "listing",
            Self::Search => "search",
            Self::Aggregate => "aggregate",
        }
    }

    /// Parse a tag (case-insensitive)
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "listing" | "list" => Some(Self::Listing),
            "search" => Some(Self::Search),
            "aggregate" | "statistics" | "summary" => Some(Self::Aggregate),
            _ => None,
        }
    }

    /// Whether results are presented as per-lead lines
    #[must_use]
    pub fn is_row_listing(&self) -> bool {
        matches!(self, Self::Listing | Self::Search)
    }
}

impl fmt::Display for QueryIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of query synthesis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedQuery {
    /// Query text, fences and intent line removed
    pub sql: String,
    /// Intent declared by the model or classified from the SQL
    pub intent: QueryIntent,
}

impl SynthesizedQuery {
    /// Create a query with a known intent
    #[must_use]
    pub fn new(sql: impl Into<String>, intent: QueryIntent) -> Self {
        Self {
            sql: sql.into(),
            intent,
        }
    }

    /// Split raw model output into query text and intent.
    ///
    /// The SQL itself is not validated here; the store guard and engine
    /// see it next.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let cleaned = strip_code_fences(raw);

        let mut declared = None;
        let mut body = Vec::new();
        for line in cleaned.lines() {
            let trimmed = line.trim();
            if declared.is_none() && body.is_empty() {
                if trimmed.is_empty() {
                    continue;
                }
                if let Some(tag) = intent_tag(trimmed) {
                    declared = QueryIntent::from_tag(tag);
                    continue;
                }
            }
            body.push(line);
        }

        let sql = body.join("\n").trim().to_string();
        let intent = declared.unwrap_or_else(|| classify_sql(&sql));
        Self { sql, intent }
    }
}

fn intent_tag(line: &str) -> Option<&str> {
    let head = line.get(..INTENT_MARKER.len())?;
    if head.eq_ignore_ascii_case(INTENT_MARKER) {
        Some(&line[INTENT_MARKER.len()..])
    } else {
        None
    }
}

/// Remove markdown fence markers (```` ```sql ```` and ```` ``` ````)
/// wherever they appear, then surrounding whitespace
#[must_use]
pub fn strip_code_fences(text: &str) -> String {
    const FENCE: &str = "```";
    const LANG: &str = "sql";

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(FENCE) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + FENCE.len()..];
        if rest
            .get(..LANG.len())
            .is_some_and(|tag| tag.eq_ignore_ascii_case(LANG))
        {
            rest = &rest[LANG.len()..];
        }
    }
    out.push_str(rest);
    out.trim().to_string()
}

/// Classify query text when the model declared no intent.
///
/// Aggregate functions or `GROUP BY` mean Aggregate, `LIKE` means Search,
/// anything else is a Listing.
#[must_use]
pub fn classify_sql(sql: &str) -> QueryIntent {
    let upper = sql.to_ascii_uppercase();
    let words = words_with_offsets(&upper);

    let mut search = false;
    for (i, (word, end)) in words.iter().enumerate() {
        let next_char = upper[*end..].chars().find(|c| !c.is_whitespace());
        if AGGREGATE_FUNCTIONS.contains(word) && next_char == Some('(') {
            return QueryIntent::Aggregate;
        }
        if *word == "GROUP" && words.get(i + 1).map(|(w, _)| *w) == Some("BY") {
            return QueryIntent::Aggregate;
        }
        if *word == "LIKE" {
            search = true;
        }
    }

    if search {
        QueryIntent::Search
    } else {
        QueryIntent::Listing
    }
}

/// Identifier-like words with their end byte offset. Quoted literals are
/// skipped so `'count(...)'` in a search term does not count.
fn words_with_offsets(text: &str) -> Vec<(&str, usize)> {
    let mut words = Vec::new();
    let mut start = None;
    let mut quote = None;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        match (is_word, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                words.push((&text[s..i], i));
                start = None;
            }
            _ => {}
        }
        if c == '\'' || c == '"' {
            quote = Some(c);
        }
    }
    if let Some(s) = start {
        words.push((&text[s..], text.len()));
    }
    words
}

/// Turns a request into a `SynthesizedQuery` with one oracle call
#[derive(Clone)]
pub struct QuerySynthesizer {
    oracle: Oracle,
}

impl QuerySynthesizer {
    /// Create a synthesizer
    #[must_use]
    pub fn new(oracle: Oracle) -> Self {
        Self { oracle }
    }

    /// Ask the oracle for a query answering `request`
    #[instrument(skip(self, request))]
    pub async fn synthesize(&self, request: &str) -> Result<SynthesizedQuery> {
        let raw = self.oracle.complete(&prompts::sql_prompt(request)).await?;
        let query = SynthesizedQuery::parse(&raw);
        debug!(sql = %query.sql, intent = %query.intent, "query synthesized");
        Ok(query)
    }
}

//! Query normalisation and the read-only guard
//!
//! Query text arrives straight from the oracle, so the guard allows only a
//! single `SELECT` (optionally introduced by `WITH`). Quoted literals and
//! comments are skipped while scanning, so `'a;b'` or `-- drop` inside a
//! query are not mistaken for statements.

use crate::error::{Error, Result};

/// Keywords that never belong in a read-only query
const WRITE_KEYWORDS: &[&str] = &[
    "INSERT", "UPDATE", "DELETE", "DROP", "ALTER", "CREATE", "ATTACH", "DETACH", "PRAGMA",
    "VACUUM", "REINDEX",
];

/// Trim surrounding whitespace and exactly one trailing `;`
#[must_use]
pub fn normalize_query(query: &str) -> &str {
    let trimmed = query.trim();
    trimmed
        .strip_suffix(';')
        .map(str::trim_end)
        .unwrap_or(trimmed)
}

/// Allow-list applied to query text before it reaches the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryGuard {
    read_only: bool,
}

impl Default for QueryGuard {
    fn default() -> Self {
        Self::read_only()
    }
}

impl QueryGuard {
    /// Single `SELECT`/`WITH` statements only
    #[must_use]
    pub fn read_only() -> Self {
        Self { read_only: true }
    }

    /// Pass everything through to the engine unchecked
    #[must_use]
    pub fn permissive() -> Self {
        Self { read_only: false }
    }

    /// Whether the read-only allow-list is enforced
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Check an already normalised query
    ///
    /// # Errors
    /// Returns `Error::Rejected` when the query is empty, holds more than one
    /// statement, or is not a read.
    pub fn check(&self, query: &str) -> Result<()> {
        if !self.read_only {
            return Ok(());
        }

        let scan = Scan::of(query);

        let Some(first) = scan.words.first() else {
            return Err(Error::Rejected("empty query".to_string()));
        };

        if scan.has_terminator {
            return Err(Error::Rejected(
                "multiple statements are not allowed".to_string(),
            ));
        }

        if first != "SELECT" && first != "WITH" {
            return Err(Error::Rejected(format!(
                "only SELECT queries are allowed, got {first}"
            )));
        }

        if let Some(word) = scan
            .words
            .iter()
            .find(|w| WRITE_KEYWORDS.contains(&w.as_str()))
        {
            return Err(Error::Rejected(format!("{word} is not allowed")));
        }

        Ok(())
    }
}

/// Upper-cased words outside literals/comments, plus whether a bare `;` was seen
struct Scan {
    words: Vec<String>,
    has_terminator: bool,
}

impl Scan {
    fn of(query: &str) -> Self {
        #[derive(PartialEq)]
        enum State {
            Code,
            SingleQuote,
            DoubleQuote,
            LineComment,
            BlockComment,
        }

        let mut words = Vec::new();
        let mut has_terminator = false;
        let mut current = String::new();
        let mut state = State::Code;
        let mut chars = query.chars().peekable();

        while let Some(c) = chars.next() {
            match state {
                State::Code => {
                    if c.is_alphanumeric() || c == '_' {
                        current.push(c.to_ascii_uppercase());
                        continue;
                    }
                    if !current.is_empty() {
                        words.push(std::mem::take(&mut current));
                    }
                    match c {
                        '\'' => state = State::SingleQuote,
                        '"' => state = State::DoubleQuote,
                        ';' => has_terminator = true,
                        '-' if chars.peek() == Some(&'-') => {
                            chars.next();
                            state = State::LineComment;
                        }
                        '/' if chars.peek() == Some(&'*') => {
                            chars.next();
                            state = State::BlockComment;
                        }
                        _ => {}
                    }
                }
                State::SingleQuote if c == '\'' => state = State::Code,
                State::DoubleQuote if c == '"' => state = State::Code,
                State::LineComment if c == '\n' => state = State::Code,
                State::BlockComment if c == '*' && chars.peek() == Some(&'/') => {
                    chars.next();
                    state = State::Code;
                }
                _ => {}
            }
        }
        if !current.is_empty() {
            words.push(current);
        }

        Self {
            words,
            has_terminator,
        }
    }
}

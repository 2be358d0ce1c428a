//! Daily rates per engineering role
//!
//! The proposal pipeline quotes costs against this table. The cost prompt
//! embeds every entry, so the model only ever prices against these roles.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One role and its daily rate in dollars
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRate {
    /// Role title as it appears in estimates
    pub role: String,
    /// Dollars per day
    pub daily_rate: u32,
}

impl RoleRate {
    /// Create an entry
    #[must_use]
    pub fn new(role: impl Into<String>, daily_rate: u32) -> Self {
        Self {
            role: role.into(),
            daily_rate,
        }
    }
}

/// Immutable, ordered mapping from role title to daily rate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    entries: Vec<RoleRate>,
}

impl Default for RateTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RateTable {
    /// The standard six-role table
    #[must_use]
    pub fn standard() -> Self {
        Self {
            entries: vec![
                RoleRate::new("Junior Engineer", 400),
                RoleRate::new("Senior Engineer", 800),
                RoleRate::new("Tech Lead", 1200),
                RoleRate::new("Project Manager", 1000),
                RoleRate::new("DevOps Engineer", 900),
                RoleRate::new("QA Engineer", 600),
            ],
        }
    }

    /// Build a table from explicit entries
    ///
    /// # Errors
    /// `Error::InvalidRateTable` when the list is empty, a role is blank or
    /// repeated, or a rate is zero.
    pub fn new(entries: Vec<RoleRate>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::InvalidRateTable("no roles defined".to_string()));
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            let role = entry.role.trim();
            if role.is_empty() {
                return Err(Error::InvalidRateTable("role title is blank".to_string()));
            }
            if entry.daily_rate == 0 {
                return Err(Error::InvalidRateTable(format!(
                    "daily rate for '{role}' must be positive"
                )));
            }
            if !seen.insert(role.to_lowercase()) {
                return Err(Error::InvalidRateTable(format!("role '{role}' listed twice")));
            }
        }

        Ok(Self { entries })
    }

    /// Daily rate for a role (case-insensitive)
    #[must_use]
    pub fn rate(&self, role: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.role.eq_ignore_ascii_case(role.trim()))
            .map(|e| e.daily_rate)
    }

    /// Entries in table order
    pub fn iter(&self) -> impl Iterator<Item = &RoleRate> {
        self.entries.iter()
    }

    /// Number of roles
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed table
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One `- <role>: $<rate>/day` line per entry
    #[must_use]
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("- {}: ${}/day", e.role, e.daily_rate))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

//! Lead records

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Name of the leads table
pub const LEADS_TABLE: &str = "sales_leads";

/// Column names and declared types of `sales_leads`, in table order
pub const LEAD_COLUMNS: &[(&str, &str)] = &[
    ("id", "INTEGER"),
    ("customer_name", "VARCHAR"),
    ("company", "VARCHAR"),
    ("needs", "VARCHAR"),
    ("budget", "DECIMAL"),
    ("timeline_start", "DATE"),
    ("timeline_end", "DATE"),
    ("created_at", "TIMESTAMP"),
];

/// A stored sales lead. The store assigns `id`; everything else is read-only
/// to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Store-assigned identifier, monotonically increasing
    pub id: i64,
    /// Contact name
    pub customer_name: String,
    /// Company name
    pub company: String,
    /// What the customer needs
    pub needs: String,
    /// Budget in dollars
    pub budget: f64,
    /// Desired project start
    pub timeline_start: NaiveDate,
    /// Desired project end
    pub timeline_end: NaiveDate,
    /// When the lead was recorded
    pub created_at: DateTime<Utc>,
}

/// A lead that has not been inserted yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLead {
    /// Contact name
    pub customer_name: String,
    /// Company name
    pub company: String,
    /// What the customer needs
    pub needs: String,
    /// Budget in dollars
    pub budget: f64,
    /// Desired project start
    pub timeline_start: NaiveDate,
    /// Desired project end (not required to follow the start)
    pub timeline_end: NaiveDate,
    /// When the lead was recorded
    pub created_at: DateTime<Utc>,
}

impl NewLead {
    /// Create a lead with the given contact, company and needs.
    ///
    /// Budget defaults to zero and the timeline to a single day today.
    #[must_use]
    pub fn new(
        customer_name: impl Into<String>,
        company: impl Into<String>,
        needs: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            customer_name: customer_name.into(),
            company: company.into(),
            needs: needs.into(),
            budget: 0.0,
            timeline_start: now.date_naive(),
            timeline_end: now.date_naive(),
            created_at: now,
        }
    }

    /// Set the budget
    #[must_use]
    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = budget;
        self
    }

    /// Set the timeline
    #[must_use]
    pub fn with_timeline(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.timeline_start = start;
        self.timeline_end = end;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lead_builder() {
        let start = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2027, 6, 30).unwrap();
        let lead = NewLead::new("Ada Park", "Northwind", "Cloud migration")
            .with_budget(125_000.50)
            .with_timeline(start, end);

        assert_eq!(lead.company, "Northwind");
        assert_eq!(lead.budget, 125_000.50);
        assert_eq!(lead.timeline_start, start);
        assert_eq!(lead.timeline_end, end);
    }

    #[test]
    fn test_lead_columns_order() {
        let names: Vec<&str> = LEAD_COLUMNS.iter().map(|(name, _)| *name).collect();
        assert_eq!(names.first(), Some(&"id"));
        assert_eq!(names.len(), 8);
        assert!(names.contains(&"needs"));
    }
}

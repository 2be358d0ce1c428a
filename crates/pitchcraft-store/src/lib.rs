//! Pitchcraft Store - sales-leads tabular store
//!
//! - Lead: the `sales_leads` record and its insert form
//! - Store: SQLite access (schema check, migrations, query execution)
//! - ResultSet: dynamically typed rows with preserved column order
//! - Guard: read-only allow-list applied before execution
//! - Seed: synthetic lead generation

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod guard;
pub mod lead;
pub mod result_set;
pub mod seed;
pub mod store;

pub use error::{Error, Result};
pub use guard::{normalize_query, QueryGuard};
pub use lead::{Lead, NewLead, LEADS_TABLE, LEAD_COLUMNS};
pub use result_set::{ResultSet, Row, Value};
pub use seed::{generate_leads, BUSINESS_NEEDS};
pub use store::{default_db_path, LeadStore};

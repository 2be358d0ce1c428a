//! Store - the sales-leads table over SQLite
//!
//! `LeadStore` is the only component that touches the database. Query text
//! is normalised, checked by the `QueryGuard`, and handed to the engine
//! as-is; rows come back as a `ResultSet` with the engine's column order.

mod helpers;
mod migrations;


use crate::error::{Error, Result};
use crate::guard::{normalize_query, QueryGuard};
use crate::lead::{Lead, NewLead, LEADS_TABLE};
use crate::result_set::ResultSet;
use helpers::{format_date, format_timestamp, row_to_lead, rows_to_result_set};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

const INSERT_LEAD: &str = r#"
    INSERT INTO sales_leads (
        customer_name, company, needs, budget,
        timeline_start, timeline_end, created_at
    ) VALUES (?, ?, ?, ?, ?, ?, ?)
"#;

/// Get the default data directory
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|p| p.join(".pitchcraft"))
        .unwrap_or_else(|| PathBuf::from(".pitchcraft"))
}

/// Get the default database path
pub fn default_db_path() -> PathBuf {
    default_data_dir().join("leads.db")
}

/// Sales-leads store backed by a SQLite connection pool
#[derive(Clone)]
pub struct LeadStore {
    pool: SqlitePool,
    guard: QueryGuard,
}

impl LeadStore {
    /// Wrap an existing pool, failing fast if `sales_leads` is missing
    ///
    /// # Errors
    /// Returns `Error::Schema` listing the available tables when the leads
    /// table does not exist.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        let store = Self {
            pool,
            guard: QueryGuard::default(),
        };
        store.verify_schema().await?;
        Ok(store)
    }

    /// Open an existing database file
    ///
    /// The file is never created here; use [`LeadStore::create`] for that.
    pub async fn connect(db_path: &Path) -> Result<Self> {
        let db_url = format!("sqlite:{}?mode=rw", db_path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await
            .map_err(|e| Error::Database(format!("{}: {e}", db_path.display())))?;

        let store = Self::from_pool(pool).await?;
        info!("Lead store opened at {}", db_path.display());
        Ok(store)
    }

    /// Open or create a database file and make sure the table exists
    pub async fn create(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| Error::Database(format!("failed to create directory: {e}")))?;
            }
        }

        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        migrations::run(&pool).await?;

        let store = Self::from_pool(pool).await?;
        info!("Lead store initialized at {}", db_path.display());
        Ok(store)
    }

    /// Create a new in-memory store (for testing)
    pub async fn in_memory() -> Result<Self> {
        // A single connection that never expires keeps the in-memory
        // database alive for the pool's lifetime.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        migrations::run(&pool).await?;

        debug!("In-memory lead store initialized");
        Self::from_pool(pool).await
    }

    /// Replace the query guard
    #[must_use]
    pub fn with_guard(mut self, guard: QueryGuard) -> Self {
        self.guard = guard;
        self
    }

    /// The active query guard
    #[must_use]
    pub fn guard(&self) -> QueryGuard {
        self.guard
    }

    /// Names of user tables, sorted
    pub async fn list_tables(&self) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))
    }

    async fn verify_schema(&self) -> Result<()> {
        let tables = self.list_tables().await?;
        if tables.iter().any(|t| t == LEADS_TABLE) {
            return Ok(());
        }
        Err(Error::Schema {
            table: LEADS_TABLE.to_string(),
            available: tables,
        })
    }

    /// Execute query text and collect every row
    ///
    /// # Errors
    /// `Error::Rejected` if the guard refuses the text, `Error::Query` if the
    /// engine does.
    #[instrument(skip(self, query))]
    pub async fn execute(&self, query: &str) -> Result<ResultSet> {
        let sql = normalize_query(query);
        self.guard.check(sql)?;

        debug!(sql, "executing query");
        let rows = sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::Query(e.to_string()))?;

        let result = rows_to_result_set(&rows)?;
        debug!(rows = result.len(), "query complete");
        Ok(result)
    }

    /// Execute a fixed query template with positional text parameters
    #[instrument(skip(self, query, params), fields(params = params.len()))]
    pub async fn execute_bound(&self, query: &str, params: &[&str]) -> Result<ResultSet> {
        let sql = normalize_query(query);
        self.guard.check(sql)?;

        let mut statement = sqlx::query(sql);
        for param in params {
            statement = statement.bind(param.to_string());
        }

        let rows = statement
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::Query(e.to_string()))?;

        rows_to_result_set(&rows)
    }

    /// Insert one lead and return its assigned identifier
    pub async fn insert_lead(&self, lead: &NewLead) -> Result<i64> {
        let result = sqlx::query(INSERT_LEAD)
            .bind(&lead.customer_name)
            .bind(&lead.company)
            .bind(&lead.needs)
            .bind(lead.budget)
            .bind(format_date(lead.timeline_start))
            .bind(format_date(lead.timeline_end))
            .bind(format_timestamp(lead.created_at))
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(result.last_insert_rowid())
    }

    /// Insert many leads in one transaction; returns how many were written
    pub async fn insert_leads(&self, leads: &[NewLead]) -> Result<usize> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        for lead in leads {
            sqlx::query(INSERT_LEAD)
                .bind(&lead.customer_name)
                .bind(&lead.company)
                .bind(&lead.needs)
                .bind(lead.budget)
                .bind(format_date(lead.timeline_start))
                .bind(format_date(lead.timeline_end))
                .bind(format_timestamp(lead.created_at))
                .execute(&mut *tx)
                .await
                .map_err(|e| Error::Database(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        info!(count = leads.len(), "Inserted leads");
        Ok(leads.len())
    }

    /// Fetch one lead by identifier
    pub async fn get_lead(&self, id: i64) -> Result<Option<Lead>> {
        let row = sqlx::query(
            r#"
            SELECT id, customer_name, company, needs, budget,
                   timeline_start, timeline_end, created_at
            FROM sales_leads WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        row.map(row_to_lead).transpose()
    }

    /// Number of stored leads
    pub async fn count_leads(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sales_leads")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// Close the underlying pool
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

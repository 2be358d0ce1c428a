//! Schema for the leads table

use crate::error::{Error, Result};
use sqlx::sqlite::SqlitePool;

/// Create `sales_leads` if it does not exist.
///
/// `AUTOINCREMENT` keeps identifiers monotonic even after deletes.
pub(super) async fn run(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sales_leads (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_name VARCHAR NOT NULL,
            company VARCHAR NOT NULL,
            needs VARCHAR NOT NULL,
            budget DECIMAL(12, 2) NOT NULL DEFAULT 0,
            timeline_start DATE,
            timeline_end DATE,
            created_at TIMESTAMP NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| Error::Database(e.to_string()))?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_sales_leads_company
        ON sales_leads(company)
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| Error::Database(e.to_string()))?;

    Ok(())
}

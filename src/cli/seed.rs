//! `pitchcraft seed`

use crate::config::AppConfig;
use anyhow::{Context, Result};
use pitchcraft_store::{generate_leads, LeadStore};
use std::path::PathBuf;
use tracing::info;

/// Create the database if needed and insert `count` synthetic leads.
pub async fn run(count: usize, path: Option<PathBuf>, config: &AppConfig) -> Result<()> {
    let path = path.unwrap_or_else(|| config.db_path());
    let store = LeadStore::create(&path)
        .await
        .with_context(|| format!("Failed to create lead database at {}", path.display()))?;

    let leads = generate_leads(count, &mut rand::thread_rng(), chrono::Utc::now());
    let inserted = store
        .insert_leads(&leads)
        .await
        .context("Failed to insert leads")?;
    let total = store.count_leads().await.context("Failed to count leads")?;
    store.close().await;

    info!(inserted, total, path = %path.display(), "seeded lead database");
    println!("Inserted {inserted} leads into {} ({total} total)", path.display());
    Ok(())
}

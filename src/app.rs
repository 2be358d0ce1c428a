//! Runtime wiring: lead store and oracle from configuration

use crate::cli::fail;
use crate::config::AppConfig;
use anyhow::Result;
use pitchcraft_llm::{OpenAiConfig, OpenAiProvider, Oracle};
use pitchcraft_store::{LeadStore, QueryGuard};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Open the existing lead database, checking for the leads table
pub async fn open_store(config: &AppConfig) -> Result<LeadStore> {
    let path = config.db_path();
    let store = LeadStore::connect(&path)
        .await
        .map_err(|e| fail(e.into()).context(format!("Cannot open {}", path.display())))?;

    let guard = if config.store.read_only {
        QueryGuard::read_only()
    } else {
        QueryGuard::permissive()
    };
    info!(path = %path.display(), read_only = guard.is_read_only(), "lead store opened");
    Ok(store.with_guard(guard))
}

/// Provider settings: `OPENAI_*` variables first, configuration second
pub fn provider_config(config: &AppConfig) -> pitchcraft_llm::Result<OpenAiConfig> {
    let mut provider = OpenAiConfig::from_env()?;

    if std::env::var("OPENAI_MODEL").is_err() {
        if let Some(model) = &config.llm.model {
            provider = provider.with_model(model);
        }
    }
    if std::env::var("OPENAI_BASE_URL").is_err() {
        if let Some(url) = &config.llm.base_url {
            provider = provider.with_base_url(url);
        }
    }
    Ok(provider.with_timeout(Duration::from_secs(config.llm.timeout_secs)))
}

/// Build the oracle every agent shares
pub fn build_oracle(config: &AppConfig) -> Result<Oracle> {
    let provider_config = provider_config(config).map_err(|e| fail(e.into()))?;
    info!(model = %provider_config.default_model, "oracle configured");

    let mut oracle = Oracle::new(Arc::new(OpenAiProvider::new(provider_config)));
    if let Some(temperature) = config.llm.temperature {
        oracle = oracle.with_temperature(temperature);
    }
    Ok(oracle)
}

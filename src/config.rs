//! Application configuration
//!
//! Loaded from embedded defaults, optional files and `PITCHCRAFT_*`
//! environment variables. Oracle credentials stay in the `OPENAI_*`
//! variables read by the provider.

mod loader;

pub use loader::load_config;

use pitchcraft_core::{RateTable, RoleRate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    /// Rate table override; the standard table when absent
    #[serde(default)]
    pub rates: Option<Vec<RoleRate>>,
}

/// Lead store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database file (default: `~/.pitchcraft/leads.db`)
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Only allow single read-only statements
    #[serde(default = "default_read_only")]
    pub read_only: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            read_only: default_read_only(),
        }
    }
}

fn default_read_only() -> bool {
    true
}

/// Oracle settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: None,
            base_url: None,
            timeout_secs: default_timeout_secs(),
            temperature: None,
        }
    }
}

fn default_timeout_secs() -> u64 {
    120
}

impl AppConfig {
    /// Database path, falling back to the per-user default
    pub fn db_path(&self) -> PathBuf {
        self.store
            .path
            .clone()
            .unwrap_or_else(pitchcraft_store::default_db_path)
    }

    /// Validated rate table
    pub fn rate_table(&self) -> pitchcraft_core::Result<RateTable> {
        match &self.rates {
            Some(entries) => RateTable::new(entries.clone()),
            None => Ok(RateTable::standard()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.store.read_only);
        assert_eq!(config.llm.timeout_secs, 120);
        assert_eq!(config.rate_table().unwrap(), RateTable::standard());
        assert!(config.db_path().ends_with("leads.db"));
    }

    #[test]
    fn test_rate_override() {
        let config = AppConfig {
            rates: Some(vec![RoleRate::new("Architect", 1500)]),
            ..Default::default()
        };
        let table = config.rate_table().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rate("Architect"), Some(1500));
    }

    #[test]
    fn test_invalid_rate_override() {
        let config = AppConfig {
            rates: Some(vec![]),
            ..Default::default()
        };
        assert!(config.rate_table().is_err());
    }
}

//! Configuration loading

use super::AppConfig;
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};

/// Embedded default configuration
pub const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

/// Load configuration from files and environment
pub fn load_config() -> Result<AppConfig> {
    let config = Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        .add_source(File::with_name("config/local").required(false))
        // PITCHCRAFT_STORE__READ_ONLY=false, PITCHCRAFT_LLM__MODEL=...
        .add_source(
            Environment::with_prefix("PITCHCRAFT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    config
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_defaults_parse() {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(config.store.read_only);
        assert!(config.store.path.is_none());
        assert_eq!(config.llm.timeout_secs, 120);
        assert!(config.rates.is_none());
    }

    #[test]
    fn test_rates_from_toml() {
        let toml = r#"
[store]
read_only = false

[[rates]]
role = "Architect"
daily_rate = 1500

[[rates]]
role = "Developer"
daily_rate = 700
"#;
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(!config.store.read_only);
        let table = config.rate_table().unwrap();
        assert_eq!(table.rate("Developer"), Some(700));
    }
}

//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use modulo_commerce::cart::StoreOptions;
use modulo_observability::{LogFormat, LogLevel, StructuredLogger};

/// Config file names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["modulo.toml", ".modulo.toml", "modulo.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Cart store settings.
    #[serde(default)]
    pub cart: StoreOptions,

    /// Where the cart is persisted.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    /// Parse config text; the format follows the file extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the cart, relative to the working directory.
    #[serde(default = "default_storage_dir")]
    pub dir: String,
}

fn default_storage_dir() -> String {
    ".modulo".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Minimum level written to stderr.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `human` or `json`.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl LogConfig {
    /// Build the logger handed to the cart store. `verbose` lowers the
    /// threshold to debug.
    pub fn logger(&self, verbose: bool) -> Result<StructuredLogger> {
        let level: LogLevel = self
            .level
            .parse()
            .with_context(|| format!("Invalid log.level: {}", self.level))?;
        let level = if verbose {
            level.min(LogLevel::Debug)
        } else {
            level
        };

        Ok(StructuredLogger::new("modulo")
            .with_min_level(level)
            .with_format(self.format))
    }
}

/// Generate a default modulo.toml config file.
pub fn generate_default_config() -> String {
    r#"# Modulo storefront configuration

[cart]
storage_key = "cart.v1"
ungrouped_label = "ungrouped"

[storage]
dir = ".modulo"

[log]
# trace | debug | info | warn | error
level = "warn"
# human | json
format = "human"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config = CliConfig::parse("modulo.toml", &generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CliConfig::parse(
            "modulo.toml",
            "[cart]\nungrouped_label = \"No design\"\n\n[log]\nformat = \"json\"\n",
        )
        .unwrap();
        assert_eq!(config.cart.ungrouped_label, "No design");
        assert_eq!(config.cart.storage_key, "cart.v1");
        assert_eq!(config.storage.dir, ".modulo");
        assert_eq!(config.log.level, "warn");
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn test_json_config() {
        let config = CliConfig::parse(
            "modulo.json",
            r#"{"storage": {"dir": "/var/lib/modulo"}}"#,
        )
        .unwrap();
        assert_eq!(config.storage.dir, "/var/lib/modulo");
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let err = CliConfig::parse("broken.toml", "[cart\n").unwrap_err();
        assert!(format!("{:#}", err).contains("broken.toml"));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modulo.toml");
        std::fs::write(&path, "[log]\nlevel = \"debug\"\n").unwrap();

        let config = CliConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.log.level, "debug");
        assert!(CliConfig::load("missing/modulo.toml").is_err());
    }

    #[test]
    fn test_logger_level() {
        let log = LogConfig::default();
        assert!(!log.logger(false).unwrap().enabled(LogLevel::Info));
        assert!(log.logger(true).unwrap().enabled(LogLevel::Debug));

        let bad = LogConfig {
            level: "loud".to_string(),
            ..LogConfig::default()
        };
        assert!(bad.logger(false).is_err());
    }
}

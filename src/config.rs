//! Engine configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::games::gomoku::VariantRegistry;

/// Settings for the binary and the variant registry.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct EngineConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,

    /// Variants offered to players.
    #[serde(default = "default_enabled_variants")]
    enabled_variants: Vec<String>,

    /// Variant used when a command does not name one.
    #[serde(default = "default_variant")]
    default_variant: String,
}

#[instrument]
fn default_log_filter() -> String {
    "info".to_string()
}

#[instrument]
fn default_enabled_variants() -> Vec<String> {
    VariantRegistry::standard()
        .names()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[instrument]
fn default_variant() -> String {
    "freestyle".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            enabled_variants: default_enabled_variants(),
            default_variant: default_variant(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(variants = ?config.enabled_variants, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid configuration.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Builds the registry of enabled variants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variant is unknown or the default
    /// variant is not enabled.
    #[instrument(skip(self))]
    pub fn registry(&self) -> Result<VariantRegistry, ConfigError> {
        let registry = VariantRegistry::only(&self.enabled_variants)
            .map_err(|e| ConfigError::new(format!("Invalid enabled_variants: {}", e)))?;
        if registry.get(&self.default_variant).is_none() {
            return Err(ConfigError::new(format!(
                "Default variant '{}' is not enabled",
                self.default_variant
            )));
        }
        Ok(registry)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

// File: src/config.rs
// Purpose: Configuration parsing from slots.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Slot engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub inflection: InflectionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Slot registry rules
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RegistryConfig {
    /// Slot names rejected in addition to `content`
    #[serde(default)]
    pub reserved_names: Vec<String>,
}

/// Extra words for the collection accessor pluralizer
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InflectionConfig {
    /// singular -> plural overrides (e.g. `cactus = "cacti"`)
    #[serde(default)]
    pub irregular: HashMap<String, String>,

    /// Words whose plural is the word itself
    #[serde(default)]
    pub uncountable: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is not set
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default = "default_true")]
    pub ansi: bool,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            ansi: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./slots.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("slots.toml")
    }
}

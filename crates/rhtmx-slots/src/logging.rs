// File: src/logging.rs
// Purpose: tracing subscriber setup driven by the [logging] config section

use crate::config::LoggingConfig;
use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Build the filter: RUST_LOG wins, otherwise the configured level
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| anyhow!("Invalid log level {:?}: {}", config.level, e)),
    }
}

/// Install the global fmt subscriber
pub fn init(config: &LoggingConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config)?)
        .with_ansi(config.ansi)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}

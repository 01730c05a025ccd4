//! Tracing subscriber setup

use crate::config::{LedgerConfig, LogFormat};
use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset
pub fn default_directives(config: &LedgerConfig) -> String {
    let level = config.log_level.trim().to_ascii_lowercase();
    format!("{level},tower_http={level}")
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level. Fails if a
/// subscriber is already installed.
pub fn init(config: &LedgerConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(config)))
        .map_err(|e| anyhow!("Invalid log filter: {}", e))?;

    let registry = tracing_subscriber::registry().with(filter);

    match config.effective_log_format() {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    }
    .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}

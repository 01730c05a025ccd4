//! Configuration loading and management
//!
//! Configuration comes from an optional YAML file (named by `LEDGER_CONFIG`)
//! and is then overridden by environment variables:
//!
//! | Variable | Field | Default |
//! |---|---|---|
//! | `APP_ENV` | `environment` | `development` |
//! | `HTTP_HOST` | `http_host` | `0.0.0.0` |
//! | `HTTP_PORT` | `http_port` | `3000` |
//! | `DATABASE_URL` | `database_url` | unset (in-memory storage) |
//! | `LOG_LEVEL` | `log_level` | `info` |
//! | `LOG_FORMAT` | `log_format` | `json` in production, `cli` otherwise |
//! | `REQUEST_TIMEOUT_SECS` | `request_timeout_secs` | `60` |

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Environment variable naming the YAML configuration file
pub const CONFIG_PATH_VAR: &str = "LEDGER_CONFIG";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line
    #[default]
    Json,
    /// Human-readable console output
    #[serde(alias = "cli")]
    Pretty,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "json" => Ok(LogFormat::Json),
            "cli" | "pretty" => Ok(LogFormat::Pretty),
            other => Err(anyhow!("Unknown log format: {}", other)),
        }
    }
}

/// Complete configuration for the ledger server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Deployment environment (`development`, `production`, ...)
    pub environment: String,

    pub http_host: String,

    pub http_port: u16,

    /// PostgreSQL connection URL; in-memory storage when absent
    pub database_url: Option<String>,

    /// Default tracing level, overridden by `RUST_LOG`
    pub log_level: String,

    /// Explicit log format; derived from `environment` when unset
    pub log_format: Option<LogFormat>,

    /// Upper bound for handling a single request
    pub request_timeout_secs: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            http_host: "0.0.0.0".to_string(),
            http_port: 3000,
            database_url: None,
            log_level: "info".to_string(),
            log_format: None,
            request_timeout_secs: 60,
        }
    }
}

impl LedgerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load the process configuration: YAML file if any, then environment
    pub fn load() -> Result<Self> {
        let config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::from_yaml_file(&path)?,
            _ => Self::default(),
        };

        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup
    ///
    /// Empty values are ignored. Numeric values that do not parse are errors.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(environment) = get("APP_ENV") {
            self.environment = environment;
        }
        if let Some(host) = get("HTTP_HOST") {
            self.http_host = host;
        }
        if let Some(port) = get("HTTP_PORT") {
            self.http_port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid HTTP_PORT '{}'", port))?;
        }
        if let Some(url) = get("DATABASE_URL") {
            self.database_url = Some(url);
        }
        if let Some(level) = get("LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(format) = get("LOG_FORMAT") {
            self.log_format = Some(format.parse()?);
        }
        if let Some(timeout) = get("REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = timeout
                .trim()
                .parse()
                .with_context(|| format!("Invalid REQUEST_TIMEOUT_SECS '{}'", timeout))?;
        }

        Ok(self)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Log format in effect: JSON in production, console output elsewhere,
    /// unless one is configured explicitly
    pub fn effective_log_format(&self) -> LogFormat {
        match self.log_format {
            Some(format) => format,
            None if self.is_production() => LogFormat::Json,
            None => LogFormat::Pretty,
        }
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

//! Pipeline configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::warn;

use crate::error::ConfigError;
use crate::validate::MAX_FILE_SIZE;

/// Configuration for the extraction pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Upload ceiling in bytes (default: 10 MiB).
    pub max_file_size: u64,
    /// Per-call extraction timeout in seconds. `None` waits indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Reject plain text that is not valid UTF-8 instead of replacing bad bytes.
    pub strict_text: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            timeout_secs: None,
            strict_text: false,
        }
    }
}

impl ExtractionConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string())),
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            Some("yaml" | "yml") => {
                serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            _ => Err(ConfigError::UnsupportedFormat),
        }
    }

    /// Create config from environment variables.
    ///
    /// Reads:
    /// - `NETWORTH_MAX_FILE_SIZE` (bytes, default: 10 MiB)
    /// - `NETWORTH_EXTRACTION_TIMEOUT_SECS` (default: none)
    /// - `NETWORTH_STRICT_TEXT` (`true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`)
    ///
    /// Values that do not parse are logged and leave the default in place.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(bytes) = env_parse("NETWORTH_MAX_FILE_SIZE", |v| v.parse().ok()) {
            config.max_file_size = bytes;
        }

        if let Some(secs) = env_parse("NETWORTH_EXTRACTION_TIMEOUT_SECS", |v| v.parse().ok()) {
            config.timeout_secs = Some(secs);
        }

        if let Some(strict) = env_parse("NETWORTH_STRICT_TEXT", parse_flag) {
            config.strict_text = strict;
        }

        config
    }

    /// Set the upload ceiling.
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Set the per-call timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Reject invalid UTF-8 in plain text files.
    pub fn with_strict_text(mut self, strict: bool) -> Self {
        self.strict_text = strict;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Read `key` and parse it, warning when it is set but unusable.
fn env_parse<T>(key: &str, parse: impl FnOnce(&str) -> Option<T>) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    let parsed = parse(raw.trim());
    if parsed.is_none() {
        warn!(key, value = %raw, "Ignoring unparseable environment variable");
    }
    parsed
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

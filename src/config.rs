//! Engine configuration
//!
//! Loaded from a JSON file; every field is optional:
//!
//! ```json
//! { "log_level": "warn", "max_buffered_records": 100000, "parse_timestamps": true }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::observability::{ParseSeverityError, Severity};
use crate::record::json::JsonOptions;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    LogLevel(#[from] ParseSeverityError),

    #[error("max_buffered_records must be > 0")]
    ZeroBufferLimit,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Minimum log severity (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Upper bound on records a materializing operator may buffer
    #[serde(default)]
    pub max_buffered_records: Option<usize>,

    /// Parse RFC 3339 strings in JSON input as timestamps (default true)
    #[serde(default = "default_parse_timestamps")]
    pub parse_timestamps: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_parse_timestamps() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            max_buffered_records: None,
            parse_timestamps: default_parse_timestamps(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file and validate it
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON text and validate it
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the log level and the buffer limit
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.severity()?;

        if self.max_buffered_records == Some(0) {
            return Err(ConfigError::ZeroBufferLimit);
        }

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> Result<Severity, ConfigError> {
        Ok(self.log_level.parse()?)
    }

    /// Options for decoding input records
    pub fn json_options(&self) -> JsonOptions {
        JsonOptions {
            parse_timestamps: self.parse_timestamps,
        }
    }
}

//! Configuration types for a11ylint.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration for a11ylint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Audit defaults (formats, fix behavior, analytics).
    #[serde(default)]
    pub audit: AuditConfig,

    /// Per-check toggles, keyed by check id.
    #[serde(default)]
    pub checks: HashMap<String, ToggleConfig>,

    /// Per-analyzer toggles, keyed by analyzer id.
    #[serde(default)]
    pub analyzers: HashMap<String, ToggleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a check is enabled (default: true).
    #[must_use]
    pub fn is_check_enabled(&self, check_id: &str) -> bool {
        self.checks
            .get(check_id)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Checks if an analyzer is enabled (default: true).
    #[must_use]
    pub fn is_analyzer_enabled(&self, analyzer_id: &str) -> bool {
        self.analyzers
            .get(analyzer_id)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Ids of checks explicitly disabled in the config.
    #[must_use]
    pub fn disabled_checks(&self) -> Vec<String> {
        self.checks
            .iter()
            .filter(|(_, c)| c.enabled == Some(false))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Ids of analyzers explicitly disabled in the config.
    #[must_use]
    pub fn disabled_analyzers(&self) -> Vec<String> {
        self.analyzers
            .iter()
            .filter(|(_, c)| c.enabled == Some(false))
            .map(|(id, _)| id.clone())
            .collect()
    }
}

/// Audit-level defaults, overridable from the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Input format passed to the converter (default: "json").
    #[serde(default = "default_format")]
    pub input_format: String,

    /// Output format passed to the converter (default: "json").
    #[serde(default = "default_format")]
    pub output_format: String,

    /// Whether to apply fixes (default: true).
    #[serde(default = "default_true")]
    pub fix: bool,

    /// Regenerate alt text even for images that already carry it.
    #[serde(default)]
    pub overwrite: bool,

    /// Whether to run document analytics.
    #[serde(default)]
    pub analytics: bool,

    /// Base directory for resolving relative image paths
    /// (default: the input file's directory).
    #[serde(default)]
    pub base_dir: Option<PathBuf>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            input_format: default_format(),
            output_format: default_format(),
            fix: true,
            overwrite: false,
            analytics: false,
            base_dir: None,
        }
    }
}

fn default_format() -> String {
    "json".to_string()
}

fn default_true() -> bool {
    true
}

/// Per-check or per-analyzer toggle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToggleConfig {
    /// Whether this check/analyzer is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

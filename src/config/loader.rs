use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::types::Config;

/// Level names accepted in `[logging].level`, alone or as `target=level`.
const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/unistate/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("unistate").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Loads and validates configuration from `path`, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The log filter is a comma-separated list of `level` or
    ///   `target=level` directives with known levels
    /// - A log file, if set, is not an empty path
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_log_filter(&self.logging.level)?;

        if let Some(file) = &self.logging.file {
            if file.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError {
                    message: "logging.file must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

fn validate_log_filter(filter: &str) -> Result<(), ConfigError> {
    for directive in filter.split(',') {
        let directive = directive.trim();
        if directive.is_empty() {
            return Err(ConfigError::ValidationError {
                message: format!("Empty directive in log filter '{}'", filter),
            });
        }
        let level = directive
            .rsplit_once('=')
            .map_or(directive, |(_, level)| level)
            .to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Unknown log level '{}' (expected one of: {})",
                    level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }
    }

    EnvFilter::try_new(filter.trim()).map_err(|e| ConfigError::ValidationError {
        message: format!("Invalid log filter '{}': {}", filter, e),
    })?;
    Ok(())
}

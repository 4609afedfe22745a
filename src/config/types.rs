use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::todo::VisibilityFilter;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub replay: ReplayConfig,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log filter when `RUST_LOG` is unset (default: "warn"). Either a bare
    /// level or `EnvFilter` directives such as `warn,unistate=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Write logs to this file instead of stderr.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

/// Settings for replaying actions into the todo store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Visibility filter the store is preloaded with (default: SHOW_ALL).
    #[serde(default)]
    pub initial_filter: VisibilityFilter,
    /// Print the state after every dispatch, not only at the end.
    #[serde(default)]
    pub print_each: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            initial_filter: VisibilityFilter::ShowAll,
            print_each: false,
        }
    }
}

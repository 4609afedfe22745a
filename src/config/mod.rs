//! Configuration for the `unistate` binary.
//!
//! Read from `<config_dir>/unistate/config.toml` unless a path is given;
//! command-line flags override file values.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, LoggingConfig, ReplayConfig};

//! Application configuration.

/// Settings read from `config.toml`.
pub mod app_config;
/// Command-line flags and subcommands.
pub mod args;
/// Loading of the configuration file.
pub mod storage;

pub use app_config::{AppConfig, CacheConfig, LogLevel, NetworkConfig};
pub use args::{CliArgs, Command};
pub use storage::{ConfigError, ConfigStore};

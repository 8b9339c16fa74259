//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;
use crate::domain::entities::ImageSize;
use crate::infrastructure::image::LazyImageConfig;

pub(super) const APP_NAME: &str = "lazyimage";
pub(super) const APP_QUALIFIER: &str = "org";
pub(super) const APP_ORGANIZATION: &str = "lazyimage";
pub(super) const CONFIG_FILE_NAME: &str = "config.toml";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, read from `config.toml` and overridden by CLI flags.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path. Logs go to stderr when unset.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Disk cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Network configuration.
    #[serde(default)]
    pub network: NetworkConfig,
}

/// Disk cache configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache directory. Defaults to a directory under the system temp dir.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Size images are resized to before being cached, as `WxH`.
    #[serde(default)]
    pub size: Option<ImageSize>,
}

/// Network configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Request timeout in seconds. No timeout when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(cache_dir) = &args.cache_dir {
            self.cache.dir = Some(cache_dir.clone());
        }
        if let Some(cache_size) = args.cache_size {
            self.cache.size = Some(cache_size);
        }
        if let Some(timeout) = args.timeout {
            self.network.timeout_secs = Some(timeout);
        }
    }

    /// Returns the loader configuration.
    #[must_use]
    pub fn loader_config(&self) -> LazyImageConfig {
        LazyImageConfig {
            cache_dir: self.cache.dir.clone(),
            cache_size: self.cache.size,
            timeout_secs: self.network.timeout_secs,
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
    }

    /// Returns the `--config` path if given, else the default config file.
    #[must_use]
    pub fn effective_config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Self::default_config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
            log_level = "debug"

            [cache]
            dir = "/tmp/images"
            size = "120x80"

            [network]
            timeout_secs = 15
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.cache.dir, Some(PathBuf::from("/tmp/images")));
        assert_eq!(config.cache.size, Some(ImageSize::new(120, 80)));
        assert_eq!(config.network.timeout_secs, Some(15));
    }

    #[test]
    fn test_invalid_cache_size_is_rejected() {
        let toml_content = r#"
            [cache]
            size = "big"
        "#;

        assert!(toml::from_str::<AppConfig>(toml_content).is_err());
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.cache.size.is_none());
        assert!(config.network.timeout_secs.is_none());
    }

    #[test]
    fn test_config_flag_sets_effective_path() {
        let mut config = AppConfig::default();
        let args = CliArgs::parse_from([
            "lazyimage",
            "--config",
            "/tmp/custom.toml",
            "path",
            "https://example.com/a.png",
        ]);

        config.merge_with_args(&args);

        assert_eq!(
            config.effective_config_path(),
            Some(PathBuf::from("/tmp/custom.toml"))
        );
    }

    #[test]
    fn test_args_override_file() {
        let mut config: AppConfig = toml::from_str(
            r#"
            [cache]
            size = "10x10"
            "#,
        )
        .unwrap();
        let args = CliArgs::parse_from([
            "lazyimage",
            "--cache-size",
            "64x64",
            "--timeout",
            "5",
            "path",
            "https://example.com/a.png",
        ]);

        config.merge_with_args(&args);
        let loader = config.loader_config();

        assert_eq!(loader.cache_size, Some(ImageSize::new(64, 64)));
        assert_eq!(loader.timeout_secs, Some(5));
        assert!(loader.cache_dir.is_none());
    }
}

use super::app_config::{AppConfig, CONFIG_FILE_NAME};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Configuration storage errors.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    #[error("config io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize default config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl ConfigError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Locates and reads `config.toml`.
///
/// A missing file is created with defaults so users have something to edit.
pub struct ConfigStore {
    config_dir: PathBuf,
}

impl ConfigStore {
    /// Uses the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration directory cannot be determined.
    pub fn new() -> Result<Self, ConfigError> {
        AppConfig::default_config_dir()
            .map(Self::with_dir)
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Uses `config_dir` instead of the platform directory.
    #[must_use]
    pub const fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Returns the configuration directory path.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Loads the configuration from `path_override` or the store's directory.
    ///
    /// Malformed files are reported and replaced by defaults in memory only.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or the default file
    /// cannot be written.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let config_path = path_override.map_or_else(
            || self.config_dir.join(CONFIG_FILE_NAME),
            Path::to_path_buf,
        );

        if !config_path.exists() {
            info!(path = %config_path.display(), "Config file not found, writing defaults");
            let config = AppConfig::default();
            write_atomic(&config_path, &toml::to_string_pretty(&config)?)?;
            return Ok(config);
        }

        let content =
            fs::read_to_string(&config_path).map_err(|e| ConfigError::io(&config_path, e))?;
        match toml::from_str::<AppConfig>(&content) {
            Ok(config) => {
                debug!(path = %config_path.display(), "Loaded config");
                Ok(config)
            }
            Err(e) => {
                warn!(path = %config_path.display(), error = %e, "Malformed config, using defaults");
                Ok(AppConfig::default())
            }
        }
    }
}

/// Writes `content` through a temp file in the same directory and renames it into place.
fn write_atomic(path: &Path, content: &str) -> Result<(), ConfigError> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;

    let mut temp_file =
        tempfile::NamedTempFile::new_in(parent).map_err(|e| ConfigError::io(parent, e))?;
    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| ConfigError::io(temp_file.path(), e))?;
    temp_file
        .persist(path)
        .map_err(|e| ConfigError::io(path, e.error))?;
    Ok(())
}

//! Runtime configuration loaded from `crowdfund.toml`.
//!
//! The file is optional; if it does not exist all fields fall back to their
//! `Default` values. Command-line flags are layered on top by the binary.

use crate::utils::{
    get_config_path, get_default_log_dir, DEFAULT_DATA_DIR, PROJECTS_FILE, USERS_FILE,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config TOML {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Where the two collections live (`[storage]` table).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Unset means the current directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub users_file: String,
    pub projects_file: String,
}

impl StorageConfig {
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.data_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_DATA_DIR))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            users_file: USERS_FILE.to_string(),
            projects_file: PROJECTS_FILE.to_string(),
        }
    }
}

/// Logging settings (`[logging]` table).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is not set
    pub level: String,
    pub json: bool,
    /// daily, hourly, or never
    pub rotation: String,
    pub dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            rotation: "daily".to_string(),
            dir: get_default_log_dir(),
        }
    }
}

/// Top-level configuration.
///
/// All fields are optional at the TOML level; missing fields resolve to their
/// `Default` values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Parse configuration from TOML text.
pub fn parse_config(content: &str, path: &Path) -> Result<AppConfig, ConfigError> {
    toml::from_str(content).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

/// Load configuration from `path`, or from `<data_dir>/crowdfund.toml`.
///
/// Returns `Ok(AppConfig::default())` if the file does not exist. The data
/// directory is resolved as `data_dir` (the flag), then `storage.data_dir`
/// from the file, then the current directory.
pub fn load_config(
    path: Option<&Path>,
    data_dir: Option<&Path>,
) -> Result<AppConfig, ConfigError> {
    let lookup_dir = data_dir.unwrap_or_else(|| Path::new(DEFAULT_DATA_DIR));
    let path = path.map_or_else(|| get_config_path(lookup_dir), Path::to_path_buf);

    let mut config = if path.exists() {
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config = parse_config(&content, &path)?;
        debug!("Loaded config from {}", path.display());
        config
    } else {
        debug!("Config not found at {}; using defaults", path.display());
        AppConfig::default()
    };

    if let Some(dir) = data_dir {
        config.storage.data_dir = Some(dir.to_path_buf());
    } else if config.storage.data_dir.is_none() {
        config.storage.data_dir = Some(PathBuf::from(DEFAULT_DATA_DIR));
    }
    Ok(config)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

//! Configuration management for Depot Downloader
//!
//! Optional TOML configuration supplying store locations, concurrency
//! defaults and the log level. Command-line values always win over the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::{config, download, storage};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Persistent store locations
    pub storage: StorageConfig,
    /// Download defaults
    pub download: DownloadDefaults,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Where the persistent stores live
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Token store file
    pub account_config: PathBuf,
    /// Metadata directory name created inside each install directory
    pub depot_config_dir: String,
    /// Install root used when -dir is not given
    pub default_install_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            account_config: PathBuf::from(storage::ACCOUNT_CONFIG_FILE),
            depot_config_dir: storage::DEPOT_CONFIG_DIR.to_string(),
            default_install_dir: PathBuf::from(storage::DEFAULT_INSTALL_DIR),
        }
    }
}

impl StorageConfig {
    /// Path of the version store for an install directory
    pub fn depot_config_path(&self, install_dir: Option<&Path>) -> PathBuf {
        install_dir
            .unwrap_or(&self.default_install_dir)
            .join(&self.depot_config_dir)
            .join(storage::DEPOT_CONFIG_FILE)
    }
}

/// Concurrency defaults used when the command line does not set them
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadDefaults {
    /// Maximum number of content servers
    pub max_servers: u32,
    /// Maximum number of concurrent chunk downloads
    pub max_downloads: u32,
}

impl Default for DownloadDefaults {
    fn default() -> Self {
        Self {
            max_servers: download::DEFAULT_MAX_SERVERS,
            max_downloads: download::DEFAULT_MAX_DOWNLOADS,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: config::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration with precedence:
    /// 1. Explicit file (must exist)
    /// 2. First file found in the standard locations
    /// 3. Default values
    pub fn load(config_file_override: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = config_file_override {
            if !path.exists() {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            return Self::load_from_file(path);
        }

        match Self::find_config_file() {
            Some(path) => Self::load_from_file(&path),
            None => {
                debug!("No config file found in standard locations");
                Ok(Self::default())
            }
        }
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(config::LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            search_paths.push(dir.join(config::CONFIG_DIR_NAME).join(config::CONFIG_FILE_NAME));
        }

        search_paths.into_iter().find(|path| {
            let found = path.exists();
            if found {
                debug!("Found config file: {}", path.display());
            }
            found
        })
    }

    /// Load configuration from a TOML file
    fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: AppConfig = toml::from_str(&content)?;

        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }
}

// NovaBrowse shell configuration
// Locates the database and home document, sets the log level and history viewer size.
// Stored as a JSON file at the platform-specific config path.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::managers::storage_manager::DEFAULT_HISTORY_LIMIT;
use crate::types::errors::ConfigError;

const APP_DIR: &str = "novabrowse";
const CONFIG_FILE: &str = "config.json";
const DATABASE_FILE: &str = "browser_data.db";

/// Shell-level configuration, distinct from the user settings kept in SQLite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShellConfig {
    /// SQLite file; defaults to the platform data directory.
    pub database_path: Option<String>,
    /// Home document file; `None` serves the copy built into the binary.
    pub homepage_path: Option<String>,
    /// Number of entries shown by the history viewer.
    pub history_limit: usize,
    /// `env_logger` filter used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            homepage_path: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
            log_level: "info".to_string(),
        }
    }
}

impl ShellConfig {
    /// Resolved database location.
    pub fn database_path(&self) -> PathBuf {
        match &self.database_path {
            Some(p) => PathBuf::from(p),
            None => default_data_dir().join(DATABASE_FILE),
        }
    }
}

/// `<data dir>/novabrowse`, or the working directory when the platform has none.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `<config dir>/novabrowse/config.json`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_FILE)
}

/// Trait defining the shell configuration loader interface.
pub trait ShellConfigLoaderTrait {
    fn load(&mut self) -> Result<ShellConfig, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn get_config(&self) -> &ShellConfig;
    fn set_config(&mut self, config: ShellConfig) -> Result<(), ConfigError>;
    fn get_config_path(&self) -> &Path;
}

/// Loads and persists [`ShellConfig`] as pretty-printed JSON.
pub struct ShellConfigLoader {
    config_path: PathBuf,
    config: ShellConfig,
}

impl ShellConfigLoader {
    /// Creates a loader for `path_override`, or the platform config path.
    pub fn new(path_override: Option<PathBuf>) -> Self {
        Self {
            config_path: path_override.unwrap_or_else(default_config_path),
            config: ShellConfig::default(),
        }
    }
}

impl ShellConfigLoaderTrait for ShellConfigLoader {
    /// Loads the config file.
    ///
    /// A missing file yields defaults; a malformed one is a serialization error.
    fn load(&mut self) -> Result<ShellConfig, ConfigError> {
        if !self.config_path.exists() {
            self.config = ShellConfig::default();
            return Ok(self.config.clone());
        }

        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| ConfigError::IoError(format!("Failed to read config file: {}", e)))?;

        let config: ShellConfig = serde_json::from_str(&content).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;

        self.config = config;
        Ok(self.config.clone())
    }

    /// Writes the current config, creating parent directories as needed.
    fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.config).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&self.config_path, json)
            .map_err(|e| ConfigError::IoError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn get_config(&self) -> &ShellConfig {
        &self.config
    }

    /// Replaces the in-memory config and saves it.
    fn set_config(&mut self, config: ShellConfig) -> Result<(), ConfigError> {
        self.config = config;
        self.save()
    }

    fn get_config_path(&self) -> &Path {
        &self.config_path
    }
}

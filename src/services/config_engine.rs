// LinkStash Config Engine
// Storage and preview settings live in <config dir>/config.json; the
// LINKSTASH_* environment variables are layered on top at startup.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::platform;
use crate::types::config::AppConfig;
use crate::types::errors::ConfigError;

/// Environment variable overriding `preview.api_key`.
pub const ENV_PREVIEW_API_KEY: &str = "LINKSTASH_PREVIEW_API_KEY";
/// Environment variable naming the directory for the database file.
pub const ENV_DATA_DIR: &str = "LINKSTASH_DATA_DIR";
/// File name of the database inside the data directory.
pub const DATABASE_FILE: &str = "linkstash.db";

/// Trait defining the config engine interface.
pub trait ConfigEngineTrait {
    fn load(&mut self) -> Result<AppConfig, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn get_config(&self) -> &AppConfig;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), ConfigError>;
    fn reset(&mut self) -> Result<(), ConfigError>;
    fn get_config_path(&self) -> &str;
}

/// Config engine that persists the configuration as JSON on disk.
pub struct ConfigEngine {
    config_path: String,
    config: AppConfig,
}

impl ConfigEngine {
    /// Creates a new ConfigEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses `config.json` in the platform config directory.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => platform::get_config_dir()
                .join("config.json")
                .to_string_lossy()
                .to_string(),
        };

        Self {
            config_path,
            config: AppConfig::default(),
        }
    }

    /// Returns the stored config with environment overrides applied.
    ///
    /// Overrides are never written back to the config file.
    pub fn effective_config(&self) -> AppConfig {
        apply_env_overrides(self.config.clone(), |name| std::env::var(name).ok())
    }
}

/// Applies `LINKSTASH_*` overrides read through `lookup`.
///
/// `LINKSTASH_DATA_DIR` only takes effect when no explicit database path is
/// configured.
pub fn apply_env_overrides<F>(mut config: AppConfig, lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup(ENV_PREVIEW_API_KEY).filter(|v| !v.is_empty()) {
        config.preview.api_key = Some(key);
    }
    if config.storage.database_path.is_none() {
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.is_empty()) {
            config.storage.database_path = Some(
                PathBuf::from(dir)
                    .join(DATABASE_FILE)
                    .to_string_lossy()
                    .to_string(),
            );
        }
    }
    config
}

/// Resolves the database file path, defaulting to the platform data directory.
pub fn resolve_database_path(config: &AppConfig) -> PathBuf {
    match &config.storage.database_path {
        Some(path) => PathBuf::from(path),
        None => platform::get_data_dir().join(DATABASE_FILE),
    }
}

impl ConfigEngineTrait for ConfigEngine {
    /// Reads `config.json`. A missing file means defaults and is not created.
    fn load(&mut self) -> Result<AppConfig, ConfigError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            self.config = AppConfig::default();
            return Ok(self.config.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("Failed to read config file: {}", e)))?;

        let config: AppConfig = serde_json::from_str(&content).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;

        info!(path = %self.config_path, "config loaded");
        self.config = config;
        Ok(self.config.clone())
    }

    /// Writes the stored config (never the env overrides) as pretty JSON.
    fn save(&self) -> Result<(), ConfigError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.config).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| ConfigError::IoError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn get_config(&self) -> &AppConfig {
        &self.config
    }

    /// Sets `section.field` (e.g. `preview.policy`, `storage.database_path`)
    /// to `value` and saves.
    ///
    /// The whole config is re-read from the edited tree, so a value of the
    /// wrong type leaves the current config and the file untouched.
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), ConfigError> {
        let (section, field) = key
            .split_once('.')
            .filter(|(s, f)| !s.is_empty() && !f.is_empty() && !f.contains('.'))
            .ok_or_else(|| {
                ConfigError::InvalidKey(format!("expected <section>.<field>, got '{}'", key))
            })?;

        let mut tree = serde_json::to_value(&self.config).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize config: {}", e))
        })?;
        let slot = tree
            .get_mut(section)
            .and_then(|s| s.get_mut(field))
            .ok_or_else(|| ConfigError::InvalidKey(format!("unknown config key '{}'", key)))?;
        *slot = value;

        self.config = serde_json::from_value(tree)
            .map_err(|e| ConfigError::InvalidValue(format!("{}: {}", key, e)))?;
        self.save()?;
        info!(key, "config value updated");
        Ok(())
    }

    /// Drops every stored setting, API key included, and saves the defaults.
    fn reset(&mut self) -> Result<(), ConfigError> {
        self.config = AppConfig::default();
        self.save()?;
        info!(path = %self.config_path, "config reset");
        Ok(())
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}

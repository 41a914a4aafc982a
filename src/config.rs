//! Configuration loading and management
//!
//! Handles parsing of `.taskdeck.toml` configuration files plus environment
//! variable overrides for the remote store endpoints and credentials.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Config file name searched for in the working directory
pub const CONFIG_FILE: &str = ".taskdeck.toml";

/// Environment variables that override file values
pub const ENV_STORE_URL: &str = "TASKDECK_STORE_URL";
pub const ENV_BLOB_URL: &str = "TASKDECK_BLOB_URL";
pub const ENV_TOKEN: &str = "TASKDECK_TOKEN";
pub const ENV_COLLECTION: &str = "TASKDECK_COLLECTION";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote store configuration
    #[serde(default)]
    pub store: StoreConfig,
}

/// Remote document/blob store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the document store API
    #[serde(default)]
    pub base_url: String,

    /// Base URL of the blob store; falls back to `base_url` when empty
    #[serde(default)]
    pub blob_url: String,

    /// Document collection holding task records
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Bearer token attached to every request, when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_collection() -> String {
    "tasks".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            blob_url: String::new(),
            collection: default_collection(),
            token: None,
        }
    }
}

impl StoreConfig {
    /// Effective blob store base URL
    pub fn blob_base(&self) -> &str {
        if self.blob_url.trim().is_empty() {
            &self.base_url
        } else {
            &self.blob_url
        }
    }

    /// Reject configs that cannot reach a store at all.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::InvalidConfig(format!(
                "store.base_url is not set (configure {CONFIG_FILE} or {ENV_STORE_URL})"
            )));
        }
        if self.collection.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "store.collection must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from an explicit file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_env();
        Ok(config)
    }

    /// Load from `dir/.taskdeck.toml` if present, otherwise defaults.
    /// Environment overrides apply either way.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            let mut config = Config::default();
            config.apply_env();
            Ok(config)
        }
    }

    fn apply_env(&mut self) {
        if let Some(value) = env_value(ENV_STORE_URL) {
            self.store.base_url = value;
        }
        if let Some(value) = env_value(ENV_BLOB_URL) {
            self.store.blob_url = value;
        }
        if let Some(value) = env_value(ENV_COLLECTION) {
            self.store.collection = value;
        }
        if let Some(value) = env_value(ENV_TOKEN) {
            self.store.token = Some(value);
        }
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

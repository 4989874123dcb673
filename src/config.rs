//! Application configuration.

use anyhow::Result;
use embedkit_core::DependencyPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the config format
    pub version: u32,
    /// How dangling dependency references are treated at registration
    #[serde(default)]
    pub dependency_policy: DependencyPolicy,
    /// Quiet window for debounced settings writes, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Override for the instance store location
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

fn default_debounce_ms() -> u64 {
    100
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Get the configuration file path
    fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("io", "embedkit", "embedkit")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// The instance store location: the configured override, or
    /// `instances.json` under the platform data directory.
    pub fn store_file(&self) -> Result<PathBuf> {
        if let Some(path) = &self.store_path {
            return Ok(path.clone());
        }
        let dirs = directories::ProjectDirs::from("io", "embedkit", "embedkit")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().join("instances.json"))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            dependency_policy: DependencyPolicy::default(),
            debounce_ms: default_debounce_ms(),
            store_path: None,
        }
    }
}

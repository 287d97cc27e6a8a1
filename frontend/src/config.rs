//! # Configuration
//!
//! Client settings loaded from `<config dir>/me-bau/config.yaml`.
//!
//! Every section is optional; missing keys fall back to defaults. The API
//! base URL can be overridden with the `ME_BAU_API_URL` environment variable
//! (and again by the `--api-url` command line flag).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_API_URL: &str = "https://app-nhat-ky-me-bau.onrender.com";
pub const API_URL_ENV: &str = "ME_BAU_API_URL";
const APP_DIR: &str = "me-bau";
const CONFIG_FILE: &str = "config.yaml";

/// Remote service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Where the session token lives on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Token file; defaults to `<data dir>/me-bau/session.json`
    pub token_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (error, warn, info, debug, trace or a full EnvFilter string)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Directory holding `config.yaml`
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    pub fn default_config_path() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE)
    }

    /// Load from an explicit path or the default location, then apply the
    /// environment override
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);
        let mut config = Self::load_from_file(&path)?;
        config.apply_env_override(std::env::var(API_URL_ENV).ok());
        Ok(config)
    }

    /// Read a YAML config file; a missing file yields the defaults
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = serde_yaml::to_string(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    pub fn apply_env_override(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            debug!("API base URL overridden from environment: {}", url);
            self.api.base_url = url.trim().to_string();
        }
    }

    /// Token file location, resolving the default when unset
    pub fn token_file(&self) -> PathBuf {
        self.storage.token_file.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
                .join("session.json")
        })
    }
}

//! Configuration loading for askboard.
//! Reads askboard.toml from the current directory or the path in ASKBOARD_CONFIG.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use askboard_client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use askboard_store::{DEFAULT_ENROLLMENT_PREFIX, DEFAULT_ROSTER_SIZE};

pub const API_URL_ENV: &str = "ASKBOARD_API_URL";
const DEFAULT_CONFIG_PATH: &str = "askboard.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub roster: RosterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url()     -> String { DEFAULT_BASE_URL.to_string() }
fn default_timeout_secs() -> u64 { DEFAULT_TIMEOUT_SECS }

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: default_base_url(), timeout_secs: default_timeout_secs() }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Where the store snapshot is kept.
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_storage_path() -> PathBuf { PathBuf::from("./data/student-storage.json") }

impl Default for StorageConfig {
    fn default() -> Self {
        Self { path: default_storage_path() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default = "default_roster_size")]
    pub size: usize,
    #[serde(default = "default_enrollment_prefix")]
    pub enrollment_prefix: String,
}

fn default_roster_size()       -> usize { DEFAULT_ROSTER_SIZE }
fn default_enrollment_prefix() -> String { DEFAULT_ENROLLMENT_PREFIX.to_string() }

impl Default for RosterConfig {
    fn default() -> Self {
        Self { size: default_roster_size(), enrollment_prefix: default_enrollment_prefix() }
    }
}


impl Config {
    /// Load configuration from `path` (the `--config` flag or ASKBOARD_CONFIG),
    /// else askboard.toml in the current directory. A missing file is not an
    /// error: defaults apply. ASKBOARD_API_URL overrides `api.base_url` either way.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = Self::from_path(path.unwrap_or(Path::new(DEFAULT_CONFIG_PATH)))?;
        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.apply_api_url_override(url);
        }
        Ok(config)
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults (copy askboard.example.toml to askboard.toml to change them)"
            );
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {e}", path.display()))?;
        Ok(config)
    }

    fn apply_api_url_override(&mut self, url: String) {
        if !url.trim().is_empty() {
            self.api.base_url = url;
        }
    }
}

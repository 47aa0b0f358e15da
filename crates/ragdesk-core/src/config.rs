//! Configuration management for ragdesk.
//!
//! Loads configuration from ${RAGDESK_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default config template with comments, embedded at compile time.
const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("default_config.toml");

/// Environment variable that overrides `api_url`.
pub const API_URL_ENV: &str = "RAGDESK_API_URL";

pub mod paths {
    //! Path resolution for ragdesk configuration and data.
    //!
    //! RAGDESK_HOME resolution order:
    //! 1. RAGDESK_HOME environment variable (if set)
    //! 2. ~/.config/ragdesk (default)
    //! 3. ./.ragdesk when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the ragdesk home directory.
    pub fn ragdesk_home() -> PathBuf {
        if let Ok(home) = std::env::var("RAGDESK_HOME")
            && !home.trim().is_empty()
        {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".ragdesk"),
            |h| h.join(".config").join("ragdesk"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        ragdesk_home().join("config.toml")
    }

    /// Returns the path to the local state file (file list cache).
    pub fn state_path() -> PathBuf {
        ragdesk_home().join("state.json")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the backend
    pub api_url: String,

    /// Request timeout in seconds (0 disables)
    pub request_timeout_secs: u64,

    /// Log filter used when RUST_LOG is not set
    pub log_level: Option<String>,
}

impl Config {
    pub const DEFAULT_API_URL: &str = "http://localhost:8000";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Returns the effective backend URL.
    ///
    /// `RAGDESK_API_URL` wins over the config file. Empty strings are treated
    /// as unset.
    pub fn api_url(&self) -> String {
        let from_env = std::env::var(API_URL_ENV).ok();
        Self::resolve_api_url(from_env.as_deref(), &self.api_url)
    }

    fn resolve_api_url(from_env: Option<&str>, configured: &str) -> String {
        from_env
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or_else(|| Some(configured.trim()).filter(|s| !s.is_empty()))
            .unwrap_or(Self::DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.request_timeout_secs))
        }
    }

    /// Returns the configured log filter, if any.
    pub fn effective_log_level(&self) -> Option<&str> {
        self.log_level.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, DEFAULT_CONFIG_TEMPLATE)
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
            log_level: None,
        }
    }
}

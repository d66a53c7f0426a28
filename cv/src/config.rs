//! Configuration types and loading
//!
//! Settings come from a YAML file (first found of `--config`, `./.checkvist.yml`,
//! `~/.config/checkvist/checkvist.yml`), falling back to defaults. Credentials are never
//! stored in the file: they are read once from the environment into [`Credentials`].

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default Checkvist endpoint
pub const DEFAULT_BASE_URL: &str = "https://checkvist.com";

/// Where to get an API key, shown when it is missing
const API_KEY_HINT: &str = "No Checkvist API key found. Grab one at https://checkvist.com/auth/profile";

/// Shown when the username is missing
const USERNAME_HINT: &str = "Set it to the email address you log in to Checkvist with.";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// Remote API settings
    pub api: ApiConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // An explicit path must load
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        for candidate in Self::default_paths() {
            if !candidate.exists() {
                continue;
            }
            match Self::load_from_file(&candidate) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", candidate.display(), e);
                }
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Peek at the configured log level before logging is set up
    ///
    /// Errors are swallowed here; `load` reports them once logging works.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let paths = match config_path {
            Some(path) => vec![path.clone()],
            None => Self::default_paths(),
        };
        paths
            .iter()
            .filter(|p| p.exists())
            .find_map(|p| Self::load_from_file(p).ok())
            .and_then(|config| config.log_level)
    }

    fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".checkvist.yml")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("checkvist").join("checkvist.yml"));
        }
        paths
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::debug!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Remote API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Checklist that new tasks go to when `--list` is not given
    #[serde(rename = "default-list")]
    pub default_list: Option<u64>,

    /// Environment variable holding the Checkvist username
    #[serde(rename = "username-env")]
    pub username_env: String,

    /// Environment variable holding the Checkvist API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: 30_000,
            default_list: None,
            username_env: "CHECKVIST_USER".to_string(),
            api_key_env: "CHECKVIST_KEY".to_string(),
        }
    }
}

/// Errors from loading credentials
#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("ERROR: Missing environment variable\n $ export {name}='xxxxx'\n\n{hint}")]
    Missing { name: String, hint: &'static str },
}

/// Checkvist login, loaded once at startup
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub api_key: String,
}

impl Credentials {
    /// Read credentials from the environment variables named in `config`
    pub fn from_env(config: &ApiConfig) -> Result<Self, CredentialsError> {
        Self::from_lookup(config, |name| std::env::var(name).ok())
    }

    /// Read credentials through an arbitrary variable lookup
    ///
    /// Unset and blank variables both count as missing.
    pub fn from_lookup<F>(config: &ApiConfig, lookup: F) -> Result<Self, CredentialsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fetch = |name: &str, hint: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| CredentialsError::Missing {
                    name: name.to_string(),
                    hint,
                })
        };

        Ok(Self {
            username: fetch(&config.username_env, USERNAME_HINT)?,
            api_key: fetch(&config.api_key_env, API_KEY_HINT)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

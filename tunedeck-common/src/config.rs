//! Configuration loading
//!
//! Config file resolution follows the priority order:
//! 1. Command-line argument (highest priority)
//! 2. `TUNEDECK_CONFIG` environment variable
//! 3. Per-user config file (`<config_dir>/tunedeck/config.toml`)
//! 4. Compiled defaults (fallback)
//!
//! Secrets (search API key, HS256 secret) can always be overridden from the
//! environment so they never have to live in the TOML file.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// SQLite database file
    pub database_path: PathBuf,
    pub search: SearchConfig,
    pub auth: AuthConfig,
}

/// External video-search provider settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Provider API base URL
    pub base_url: String,
    /// Provider API key (`TUNEDECK_SEARCH_API_KEY` overrides)
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Bearer-credential verification settings
///
/// Exactly one mode must be configured:
/// - `jwks_url` + `issuer` (+ optional `audience`): RS256 against the
///   identity provider's published keys
/// - `hs256_secret`: shared-secret mode for development and tests
///   (`TUNEDECK_AUTH_SECRET` overrides)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwks_url: Option<String>,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub hs256_secret: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5750".to_string(),
            database_path: default_database_path(),
            search: SearchConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            api_key: String::new(),
            timeout_secs: 15,
        }
    }
}

impl Config {
    /// Resolve and load configuration following the priority order
    pub fn load(cli_path: Option<&Path>) -> Result<Config> {
        // Priority 1: Command-line argument
        if let Some(path) = cli_path {
            return Self::from_file(path);
        }

        // Priority 2: Environment variable
        if let Ok(path) = std::env::var("TUNEDECK_CONFIG") {
            return Self::from_file(Path::new(&path));
        }

        // Priority 3: Per-user config file
        if let Some(dir) = dirs::config_dir() {
            let path = dir.join("tunedeck").join("config.toml");
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        // Priority 4: Compiled defaults
        Ok(Self::default().with_env_overrides())
    }

    /// Load configuration from a specific TOML file
    pub fn from_file(path: &Path) -> Result<Config> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config.with_env_overrides())
    }

    fn with_env_overrides(mut self) -> Config {
        if let Ok(key) = std::env::var("TUNEDECK_SEARCH_API_KEY") {
            self.search.api_key = key;
        }
        if let Ok(secret) = std::env::var("TUNEDECK_AUTH_SECRET") {
            self.auth.hs256_secret = Some(secret);
        }
        self
    }
}

/// OS-dependent default database location
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("tunedeck"))
        .unwrap_or_else(|| PathBuf::from("/var/lib/tunedeck"))
        .join("tunedeck.db")
}

//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (COMICS_*)
//! 2. TOML config file (if COMICS_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Which surface the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// JSON HTTP API.
    Http,
    /// MCP tools over stdio.
    Stdio,
}

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (COMICS_*)
/// 2. TOML config file (if COMICS_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the upstream comic archive.
    ///
    /// Set via COMICS_BASE_URL environment variable.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent string for upstream requests.
    ///
    /// Set via COMICS_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Upstream request timeout in milliseconds.
    ///
    /// Set via COMICS_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Time-to-live of cached comics in seconds.
    ///
    /// Set via COMICS_CACHE_TTL_SECS environment variable.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Maximum number of cached comics (0 = unbounded).
    ///
    /// Set via COMICS_CACHE_MAX_ENTRIES environment variable.
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,

    /// Number of most recent comics scanned by search.
    ///
    /// Set via COMICS_SEARCH_WINDOW environment variable.
    #[serde(default = "default_search_window")]
    pub search_window: u32,

    /// Maximum concurrent lookups during a search scan.
    ///
    /// Set via COMICS_SEARCH_CONCURRENCY environment variable.
    #[serde(default = "default_search_concurrency")]
    pub search_concurrency: usize,

    /// Listen address for the HTTP transport.
    ///
    /// Set via COMICS_BIND_ADDR environment variable.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Surface to serve: "http" or "stdio".
    ///
    /// Set via COMICS_TRANSPORT environment variable.
    #[serde(default = "default_transport")]
    pub transport: Transport,

    /// Requests allowed per client within one rate limit window.
    ///
    /// Set via COMICS_RATE_LIMIT_MAX_REQUESTS environment variable.
    #[serde(default = "default_rate_limit_max_requests")]
    pub rate_limit_max_requests: u32,

    /// Length of the rate limit window in seconds.
    ///
    /// Set via COMICS_RATE_LIMIT_WINDOW_SECS environment variable.
    #[serde(default = "default_rate_limit_window_secs")]
    pub rate_limit_window_secs: u64,
}

fn default_base_url() -> String {
    "https://xkcd.com".into()
}

fn default_user_agent() -> String {
    "comics-api/0.1".into()
}

fn default_timeout_ms() -> u64 {
    5_000
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_cache_max_entries() -> usize {
    1024
}

fn default_search_window() -> u32 {
    100
}

fn default_search_concurrency() -> usize {
    8
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".into()
}

fn default_transport() -> Transport {
    Transport::Http
}

fn default_rate_limit_max_requests() -> u32 {
    100
}

fn default_rate_limit_window_secs() -> u64 {
    900 // 15 minutes
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_max_entries: default_cache_max_entries(),
            search_window: default_search_window(),
            search_concurrency: default_search_concurrency(),
            bind_addr: default_bind_addr(),
            transport: default_transport(),
            rate_limit_max_requests: default_rate_limit_max_requests(),
            rate_limit_window_secs: default_rate_limit_window_secs(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Cache time-to-live as Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Rate limit window as Duration.
    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `COMICS_`
    /// 2. TOML file from `COMICS_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("COMICS_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("COMICS_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

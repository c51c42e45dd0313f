//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use std::net::SocketAddr;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid { field: field.into(), reason: reason.into() }
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `base_url` is not an http(s) URL
    /// - `user_agent` is empty
    /// - `timeout_ms` is less than 100ms or exceeds 60 seconds
    /// - `cache_ttl_secs` is 0
    /// - `search_window` is 0 or exceeds 1000
    /// - `search_concurrency` is 0 or exceeds 64
    /// - `bind_addr` is not a socket address
    /// - either rate limit setting is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = url::Url::parse(&self.base_url).map_err(|e| invalid("base_url", &e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid("base_url", "scheme must be http or https"));
        }

        if self.user_agent.is_empty() {
            return Err(invalid("user_agent", "must not be empty"));
        }

        if self.timeout_ms < 100 {
            return Err(invalid("timeout_ms", "must be at least 100ms"));
        }
        if self.timeout_ms > 60_000 {
            return Err(invalid("timeout_ms", "must not exceed 60 seconds (60000ms)"));
        }

        if self.cache_ttl_secs == 0 {
            return Err(invalid("cache_ttl_secs", "must be greater than 0"));
        }

        if self.search_window == 0 || self.search_window > 1000 {
            return Err(invalid("search_window", "must be between 1 and 1000"));
        }

        if self.search_concurrency == 0 || self.search_concurrency > 64 {
            return Err(invalid("search_concurrency", "must be between 1 and 64"));
        }

        if self.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(invalid("bind_addr", "must be a socket address such as 0.0.0.0:3000"));
        }

        if self.rate_limit_max_requests == 0 {
            return Err(invalid("rate_limit_max_requests", "must be greater than 0"));
        }
        if self.rate_limit_window_secs == 0 {
            return Err(invalid("rate_limit_window_secs", "must be greater than 0"));
        }

        if self.cache_max_entries != 0 && self.cache_max_entries < self.search_window as usize {
            tracing::warn!(
                cache_max_entries = self.cache_max_entries,
                search_window = self.search_window,
                "cache_max_entries is smaller than search_window; \
                 repeated searches will refetch evicted comics"
            );
        }

        Ok(())
    }
}

//! xkcd JSON API client.
//!
//! Fetches one comic document per call and normalizes it into a
//! [`comics_core::Comic`].
//!
//! ### Specification
//!
//! - **Endpoints**: `{base}/info.0.json` (latest), `{base}/{id}/info.0.json` (by id)
//! - **Retries**: none; callers decide whether to retry
//! - **Errors**: 404 on an id is `NotFound`, any other non-success status is
//!   `HttpError` with the reason phrase, transport failures are `Timeout` or
//!   `Network`, undecodable bodies and payloads whose `num` is 0 or differs
//!   from the requested id are `Parse`
//! - **Timeout**: every request is bounded by the configured client timeout

pub mod error;
pub mod response;
pub mod url;

pub use error::XkcdError;
pub use response::RawComic;

use async_trait::async_trait;
use comics_core::{AppConfig, Comic, ComicSource};
use reqwest::{StatusCode, header};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default base URL of the archive.
const DEFAULT_BASE_URL: &str = "https://xkcd.com";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "comics-api/0.1";

/// xkcd client configuration.
#[derive(Debug, Clone)]
pub struct XkcdConfig {
    /// Base URL (default: https://xkcd.com).
    pub base_url: String,
    /// Request timeout (default: 5s).
    pub timeout: Duration,
    /// User-agent string (default: comics-api/0.1).
    pub user_agent: String,
}

impl Default for XkcdConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&AppConfig> for XkcdConfig {
    fn from(config: &AppConfig) -> Self {
        Self { base_url: config.base_url.clone(), timeout: config.timeout(), user_agent: config.user_agent.clone() }
    }
}

/// xkcd API client.
#[derive(Debug, Clone)]
pub struct XkcdClient {
    http: reqwest::Client,
    base_url: ::url::Url,
    config: XkcdConfig,
}

impl XkcdClient {
    /// Create a new client with the given configuration.
    pub fn new(config: XkcdConfig) -> Result<Self, XkcdError> {
        let base_url = url::parse_base_url(&config.base_url)?;

        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| XkcdError::Network(Arc::new(e)))?;

        Ok(Self { http, base_url, config })
    }

    /// Fetch the newest comic.
    pub async fn latest(&self) -> Result<Comic, XkcdError> {
        let url = url::latest_url(&self.base_url)?;
        self.get_comic(url, None).await
    }

    /// Fetch a comic by id.
    pub async fn by_id(&self, id: u32) -> Result<Comic, XkcdError> {
        let url = url::comic_url(&self.base_url, id)?;
        self.get_comic(url, Some(id)).await
    }

    /// Issue one GET and decode the comic document.
    ///
    /// A 404 maps to `NotFound` only when an id was requested.
    async fn get_comic(&self, url: ::url::Url, id: Option<u32>) -> Result<Comic, XkcdError> {
        let start = Instant::now();
        tracing::debug!("fetching comic: url={}", url);

        let response = self
            .http
            .get(url.as_str())
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("xkcd response status: {}", status);

        if status == StatusCode::NOT_FOUND
            && let Some(id) = id
        {
            return Err(XkcdError::NotFound(id));
        }

        if !status.is_success() {
            return Err(XkcdError::HttpError {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
            });
        }

        let bytes = response.bytes().await?;
        let raw: RawComic = serde_json::from_slice(&bytes).map_err(|e| XkcdError::Parse(e.to_string()))?;

        if raw.num == 0 {
            return Err(XkcdError::Parse("comic number must be positive, got 0".into()));
        }
        if let Some(id) = id
            && raw.num != id
        {
            return Err(XkcdError::Parse(format!("requested comic {id}, payload describes comic {}", raw.num)));
        }

        tracing::debug!(id = raw.num, "fetched comic in {:?}", start.elapsed());

        Ok(raw.into())
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &XkcdConfig {
        &self.config
    }

    /// Normalized base URL, always ending in `/`.
    pub fn base_url(&self) -> &::url::Url {
        &self.base_url
    }
}

#[async_trait]
impl ComicSource for XkcdClient {
    async fn fetch_latest(&self) -> Result<Comic, comics_core::Error> {
        self.latest().await.map_err(Into::into)
    }

    async fn fetch_by_id(&self, id: u32) -> Result<Comic, comics_core::Error> {
        self.by_id(id).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = XkcdConfig::default();
        assert_eq!(config.base_url, "https://xkcd.com");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "comics-api/0.1");
    }

    #[test]
    fn test_config_from_app_config() {
        let app = AppConfig { base_url: "http://127.0.0.1:9000".into(), timeout_ms: 250, ..Default::default() };
        let config = XkcdConfig::from(&app);
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[tokio::test]
    async fn test_client_new() {
        let client = XkcdClient::new(XkcdConfig::default()).unwrap();
        assert_eq!(client.base_url().as_str(), "https://xkcd.com/");
    }

    #[tokio::test]
    async fn test_client_new_invalid_base_url() {
        let config = XkcdConfig { base_url: "ftp://xkcd.com".into(), ..Default::default() };
        assert!(matches!(XkcdClient::new(config), Err(XkcdError::InvalidBaseUrl(_))));
    }
}

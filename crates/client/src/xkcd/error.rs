//! xkcd client error types.

use std::sync::Arc;

/// Errors from the xkcd API client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum XkcdError {
    /// Base URL could not be parsed or has an unsupported scheme.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Upstream answered 404 for a comic id.
    #[error("comic {0} not found")]
    NotFound(u32),

    /// Any other non-success HTTP response.
    #[error("HTTP {status}: {reason}")]
    HttpError { status: u16, reason: String },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for XkcdError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { XkcdError::Timeout } else { XkcdError::Network(Arc::new(err)) }
    }
}

impl From<XkcdError> for comics_core::Error {
    fn from(err: XkcdError) -> Self {
        use comics_core::Error;

        match err {
            XkcdError::NotFound(id) => Error::ComicNotFound(id),
            XkcdError::HttpError { status, reason } => Error::upstream_status(status, &reason),
            XkcdError::Timeout => Error::upstream_timeout("upstream did not respond in time"),
            XkcdError::Network(e) => Error::upstream(format!("network error: {e}")),
            XkcdError::Parse(msg) => Error::invalid_payload(format!("invalid upstream payload: {msg}")),
            XkcdError::InvalidBaseUrl(msg) => Error::upstream(format!("invalid base URL: {msg}")),
        }
    }
}

//! Unified error types for the comics service.
//!
//! Every failure from the upstream client and the search engine propagates
//! through the comic service unchanged, so the boundary layers only need to
//! map these variants.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// What went wrong talking to upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamKind {
    /// Non-success HTTP status.
    Status,
    /// No answer within the configured timeout.
    Timeout,
    /// Connection, DNS or TLS failure.
    Network,
    /// Body could not be decoded or described the wrong comic.
    InvalidPayload,
}

/// Unified error types for the comics service.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Comic id that is not a positive integer fitting `u32`.
    #[error("INVALID_ARGUMENT: comic id must be a positive integer, got {0}")]
    InvalidComicId(i64),

    /// Any other malformed input that reached the core (e.g., an empty query).
    #[error("INVALID_ARGUMENT: {0}")]
    InvalidArgument(String),

    /// Upstream confirmed the comic does not exist.
    #[error("COMIC_NOT_FOUND: {0}")]
    ComicNotFound(u32),

    /// Upstream was unreachable, too slow, or answered with something unusable.
    #[error("UPSTREAM_ERROR: {message}")]
    Upstream { kind: UpstreamKind, status: Option<u16>, message: String },
}

impl Error {
    /// Build an upstream error from a non-success HTTP status.
    pub fn upstream_status(status: u16, reason: &str) -> Self {
        let message = format!("HTTP {status}: {reason}");
        Error::Upstream { kind: UpstreamKind::Status, status: Some(status), message }
    }

    /// Build an upstream error for a transport-level failure.
    pub fn upstream(message: impl Into<String>) -> Self {
        Error::Upstream { kind: UpstreamKind::Network, status: None, message: message.into() }
    }

    pub fn upstream_timeout(message: impl Into<String>) -> Self {
        Error::Upstream { kind: UpstreamKind::Timeout, status: None, message: message.into() }
    }

    /// Build an upstream error for an undecodable or inconsistent payload.
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Error::Upstream { kind: UpstreamKind::InvalidPayload, status: None, message: message.into() }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Upstream { kind: UpstreamKind::Timeout, .. })
    }

    /// Whether a caller may reasonably retry the failed operation later.
    ///
    /// Transport failures, timeouts, 429 and 5xx responses are transient.
    /// Not-found, invalid input and bad payloads never are.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::InvalidComicId(_) | Error::InvalidArgument(_) | Error::ComicNotFound(_) => false,
            Error::Upstream { kind: UpstreamKind::Timeout | UpstreamKind::Network, .. } => true,
            Error::Upstream { kind: UpstreamKind::InvalidPayload, .. } => false,
            Error::Upstream { status, .. } => matches!(status, Some(code) if *code == 429 || *code >= 500),
        }
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidComicId(id) => (-32602, format!("comic id must be a positive integer, got {id}")),
            Error::InvalidArgument(msg) => (-32602, msg.clone()),
            Error::ComicNotFound(id) => (-32001, format!("comic {id} not found")),
            Error::Upstream { kind: UpstreamKind::Timeout, message, .. } => (-32006, message.clone()),
            Error::Upstream { message, .. } => (-32008, message.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

//! Structured errors for the comics server.
//!
//! Maps core errors and boundary validation failures to HTTP responses and
//! MCP error data. Upstream failure details are logged, not returned.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use rmcp::model::ErrorData as McpError;
use serde_json::json;
use std::time::Duration;

/// Structured errors for the comics server.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request parameters rejected at the boundary.
    #[error("{0}")]
    Validation(&'static str),

    /// Query string that could not be decoded at all (e.g., a repeated key).
    #[error("invalid query string: {0}")]
    MalformedQuery(String),

    /// Failure from the comic service.
    #[error(transparent)]
    Core(#[from] comics_core::Error),

    /// Client exceeded its request budget.
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    /// No route under `/api` matched.
    #[error("endpoint not found: {0}")]
    EndpointNotFound(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        use comics_core::Error;

        match self {
            ApiError::Validation(_) | ApiError::MalformedQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::EndpointNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Core(Error::InvalidComicId(_) | Error::InvalidArgument(_)) => StatusCode::BAD_REQUEST,
            ApiError::Core(Error::ComicNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Core(err @ Error::Upstream { .. }) if err.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Core(Error::Upstream { .. }) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use comics_core::Error;

        let status = self.status();
        let body = match &self {
            ApiError::Validation(msg) => json!({ "error": msg }),
            ApiError::MalformedQuery(detail) => json!({ "error": "Invalid query string", "message": detail }),
            ApiError::RateLimited { .. } => json!({ "error": "Too many requests, please try again later" }),
            ApiError::EndpointNotFound(path) => json!({ "error": "Endpoint not found", "path": path }),
            ApiError::Core(Error::ComicNotFound(_)) => {
                json!({ "error": "Comic not found", "message": "The requested comic does not exist" })
            }
            ApiError::Core(err @ Error::InvalidComicId(_)) => {
                json!({ "error": "Invalid comic ID", "message": err.to_string() })
            }
            ApiError::Core(Error::InvalidArgument(msg)) => json!({ "error": "Invalid argument", "message": msg }),
            ApiError::Core(err @ Error::Upstream { .. }) => {
                tracing::error!(error = %err, transient = err.is_transient(), "upstream request failed");
                json!({
                    "error": "Upstream service unavailable",
                    "message": "Failed to fetch comic data from upstream, please try again later",
                })
            }
        };

        let mut response = (status, Json(body)).into_response();
        if let ApiError::RateLimited { retry_after } = &self
            && let Ok(value) = HeaderValue::from_str(&retry_after.as_secs().max(1).to_string())
        {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }
        response
    }
}

impl From<ApiError> for McpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Core(e) => e.into(),
            other => comics_core::Error::InvalidArgument(other.to_string()).into(),
        }
    }
}

//! Request middleware: rate limiting, request logging and statistics.

use super::rate_limit::RateLimitResult;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{ConnectInfo, MatchedPath, Request, State},
    http::{HeaderName, HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use std::time::Instant;

/// Response header carrying the request id.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Best-effort client address for logging and rate limiting.
///
/// Prefers the socket peer, then the first `x-forwarded-for` hop.
pub fn client_ip(request: &Request) -> String {
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("unknown")
        .to_string()
}

/// Stats key for a request: method plus the matched route template.
pub fn endpoint_key(request: &Request) -> String {
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(MatchedPath::as_str)
        .unwrap_or("unmatched");
    format!("{} {}", request.method(), path)
}

pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let client = client_ip(&request);
    match state.limiter.check(&client) {
        RateLimitResult::Allowed { .. } => next.run(request).await,
        RateLimitResult::Limited { retry_after } => {
            tracing::warn!(
                client = %client,
                retry_after_secs = retry_after.as_secs(),
                tracked_clients = state.limiter.tracked_clients(),
                "rate limit exceeded"
            );
            ApiError::RateLimited { retry_after }.into_response()
        }
    }
}

pub async fn request_logging(request: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();

    tracing::info!(
        request_id = %request_id,
        method = %method,
        url = %uri,
        ip = %client_ip(&request),
        user_agent = request.headers().get(header::USER_AGENT).and_then(|v| v.to_str().ok()).unwrap_or("-"),
        "incoming request"
    );

    let mut response = next.run(request).await;

    tracing::info!(
        request_id = %request_id,
        method = %method,
        url = %uri,
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

pub async fn track_stats(State(state): State<AppState>, request: Request, next: Next) -> Response {
    state.stats.record(&endpoint_key(&request));
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_client_ip_falls_back_to_forwarded_for() {
        let request = Request::builder()
            .uri("/api/health")
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_ip(&request), "203.0.113.7");
    }

    #[test]
    fn test_client_ip_prefers_connect_info() {
        let mut request = Request::builder()
            .uri("/api/health")
            .header("x-forwarded-for", "203.0.113.7")
            .body(Body::empty())
            .unwrap();
        request.extensions_mut().insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 1], 4000))));
        assert_eq!(client_ip(&request), "192.0.2.1");
    }

    #[test]
    fn test_client_ip_unknown() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        assert_eq!(client_ip(&request), "unknown");
    }

    #[test]
    fn test_endpoint_key_without_match() {
        let request = Request::builder().uri("/api/nope").body(Body::empty()).unwrap();
        assert_eq!(endpoint_key(&request), "GET unmatched");
    }
}

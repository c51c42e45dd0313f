//! JSON HTTP API over the comic service.
//!
//! All routes live under `/api`. Layers, outermost first: security headers,
//! rate limiting, request logging, statistics.

pub mod middleware;
pub mod rate_limit;
pub mod routes;

use crate::state::AppState;
use axum::{
    Router,
    http::{HeaderName, HeaderValue, header},
    middleware::{from_fn, from_fn_with_state},
    routing::get,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::set_header::SetResponseHeaderLayer;

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/comics/latest", get(routes::latest))
        .route("/api/comics/random", get(routes::random))
        .route("/api/comics/search", get(routes::search))
        .route("/api/comics/{id}", get(routes::by_id))
        .route("/api/health", get(routes::health))
        .route("/api/stats", get(routes::stats))
        .route("/api/cache", get(routes::cache_stats))
        .fallback(routes::not_found)
        .method_not_allowed_fallback(routes::not_found)
        .layer(from_fn_with_state(state.clone(), middleware::track_stats))
        .layer(from_fn(middleware::request_logging))
        .layer(from_fn_with_state(state.clone(), middleware::rate_limit))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .with_state(state)
}

/// Bind `addr` and serve until ctrl-c.
pub async fn serve(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("comics HTTP API listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state).into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await?;

    Ok(())
}

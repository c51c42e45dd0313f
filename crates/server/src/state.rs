//! Shared application state for both server surfaces.

use crate::http::rate_limit::{RateLimitConfig, RateLimiter};
use comics_core::{ComicService, RequestStats};
use std::sync::Arc;

/// Everything a request handler needs, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ComicService>,
    pub stats: Arc<RequestStats>,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(service: Arc<ComicService>, rate_limit: RateLimitConfig) -> Self {
        Self { service, stats: Arc::new(RequestStats::new()), limiter: Arc::new(RateLimiter::new(rate_limit)) }
    }
}

//! Fixed-window rate limiting per client.
//!
//! Each client key gets a counter that resets when its window elapses. Stale
//! windows are swept opportunistically on every check once the sweep interval
//! has passed.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

/// Rate limit configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests allowed per window.
    pub max_requests: u32,
    /// Window length.
    pub window: Duration,
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self { max_requests, window }
    }
}

impl Default for RateLimitConfig {
    /// 100 requests per 15 minutes.
    fn default() -> Self {
        Self::new(100, Duration::from_secs(15 * 60))
    }
}

impl From<&comics_core::AppConfig> for RateLimitConfig {
    fn from(config: &comics_core::AppConfig) -> Self {
        Self::new(config.rate_limit_max_requests, config.rate_limit_window())
    }
}

/// Result of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitResult {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

#[derive(Debug)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug)]
struct Windows {
    by_client: HashMap<String, Window>,
    last_sweep: Instant,
}

/// Fixed-window limiter keyed by client identifier (usually the IP).
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    windows: Mutex<Windows>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self { config, windows: Mutex::new(Windows { by_client: HashMap::new(), last_sweep: Instant::now() }) }
    }

    /// Count one request for `client` and decide whether it may proceed.
    pub fn check(&self, client: &str) -> RateLimitResult {
        let now = Instant::now();
        let window_len = self.config.window;
        let mut windows = self.windows.lock();

        if now.duration_since(windows.last_sweep) >= window_len {
            windows.by_client.retain(|_, w| now.duration_since(w.started) < window_len);
            windows.last_sweep = now;
        }

        let window = windows
            .by_client
            .entry(client.to_string())
            .or_insert(Window { started: now, count: 0 });

        if now.duration_since(window.started) >= window_len {
            window.started = now;
            window.count = 0;
        }

        if window.count >= self.config.max_requests {
            let retry_after = window_len.saturating_sub(now.duration_since(window.started));
            return RateLimitResult::Limited { retry_after };
        }

        window.count += 1;
        RateLimitResult::Allowed { remaining: self.config.max_requests - window.count }
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.windows.lock().by_client.len()
    }
}

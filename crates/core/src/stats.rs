//! Process-wide request statistics.
//!
//! Constructed once at startup and injected into the request path; there is
//! no global instance.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Shared request counters.
#[derive(Debug)]
pub struct RequestStats {
    total_requests: AtomicU64,
    endpoints: Mutex<BTreeMap<String, u64>>,
    started: Instant,
    started_at: DateTime<Utc>,
}

/// Serializable view of the counters.
///
/// Serialized as `{ totalRequests, endpointStats, uptime, startedAt }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_requests: u64,
    pub endpoint_stats: BTreeMap<String, u64>,
    /// Seconds since startup.
    pub uptime: f64,
    pub started_at: String,
}

impl Default for RequestStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestStats {
    pub fn new() -> Self {
        Self {
            total_requests: AtomicU64::new(0),
            endpoints: Mutex::new(BTreeMap::new()),
            started: Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// Count one request against `endpoint`.
    pub fn record(&self, endpoint: &str) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        *self.endpoints.lock().entry(endpoint.to_string()).or_insert(0) += 1;
    }

    pub fn total_requests(&self) -> u64 {
        self.total_requests.load(Ordering::Relaxed)
    }

    /// Seconds since the counters were created.
    pub fn uptime_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total_requests: self.total_requests(),
            endpoint_stats: self.endpoints.lock().clone(),
            uptime: self.uptime_secs(),
            started_at: self.started_at.to_rfc3339(),
        }
    }
}

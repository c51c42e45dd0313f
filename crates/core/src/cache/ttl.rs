//! TTL cache operations.

use super::key::CacheKey;
use crate::comic::Comic;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Default time-to-live for cached comics.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct CacheEntry {
    comic: Arc<Comic>,
    fetched_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

/// Point-in-time view of the cache size and settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CacheStats {
    pub entries: usize,
    pub ttl_secs: u64,
    /// 0 means unbounded.
    pub max_entries: usize,
}

/// In-memory comic cache with lazy expiry.
///
/// Entries are replaced whole on `put`; readers never observe a partially
/// written entry.
#[derive(Debug)]
pub struct TtlCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
    max_entries: usize,
}

impl Default for TtlCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl TtlCache {
    /// Create an unbounded cache with the given time-to-live.
    pub fn new(ttl: Duration) -> Self {
        Self { entries: RwLock::new(HashMap::new()), ttl, max_entries: 0 }
    }

    /// Create a cache holding at most `max_entries` entries (0 = unbounded).
    pub fn with_max_entries(ttl: Duration, max_entries: usize) -> Self {
        Self { entries: RwLock::new(HashMap::new()), ttl, max_entries }
    }

    /// Get a fresh comic by key.
    ///
    /// Returns None if the key is missing or its entry has expired. Stale
    /// entries stay in place until overwritten or purged.
    pub fn get(&self, key: CacheKey) -> Option<Arc<Comic>> {
        let entries = self.entries.read();
        entries
            .get(&key)
            .filter(|entry| entry.is_fresh(self.ttl))
            .map(|entry| Arc::clone(&entry.comic))
    }

    /// Insert or replace the entry for `key` with a fresh timestamp.
    ///
    /// When bounded and inserting a new key into a full cache, the entry with
    /// the oldest fetch time is evicted first.
    pub fn put(&self, key: CacheKey, comic: Arc<Comic>) {
        let mut entries = self.entries.write();

        if self.max_entries > 0 && !entries.contains_key(&key) && entries.len() >= self.max_entries {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.fetched_at)
                .map(|(k, _)| *k);
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
                tracing::trace!(evicted = %oldest, "cache full, evicted oldest entry");
            }
        }

        entries.insert(key, CacheEntry { comic, fetched_at: Instant::now() });
    }

    /// Remove the entry for `key`, fresh or not.
    ///
    /// Returns whether an entry was present.
    pub fn invalidate(&self, key: CacheKey) -> bool {
        self.entries.write().remove(&key).is_some()
    }

    /// Delete expired entries.
    ///
    /// Returns the number of deleted entries.
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh(self.ttl));
        before - entries.len()
    }

    /// Delete every entry.
    ///
    /// Returns the number of deleted entries.
    pub fn clear(&self) -> usize {
        let mut entries = self.entries.write();
        let count = entries.len();
        entries.clear();
        count
    }

    /// Number of stored entries, including stale ones.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats { entries: self.len(), ttl_secs: self.ttl.as_secs(), max_entries: self.max_entries }
    }
}

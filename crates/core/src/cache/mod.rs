//! In-memory TTL cache for fetched comics.
//!
//! Entries are keyed by comic id, plus the `"latest"` sentinel. It supports:
//!
//! - Lazy expiry: staleness is checked on read, entries are replaced on write
//! - Optional size bound that evicts the oldest entry first
//! - Explicit purge of expired entries and full clears
//!
//! The lock is never held across an `.await`.

pub mod key;
pub mod ttl;

pub use key::CacheKey;
pub use ttl::{CacheStats, TtlCache};

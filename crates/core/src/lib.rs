//! Core types and shared functionality for the comics service.
//!
//! This crate provides:
//! - The comic data model and search result shapes
//! - In-memory TTL cache for fetched comics
//! - The comic service (latest, by id, random, search)
//! - Unified error types
//! - Configuration structures
//! - Request statistics shared by the server surfaces

pub mod cache;
pub mod comic;
pub mod config;
pub mod error;
pub mod search;
pub mod service;
pub mod source;
pub mod stats;

pub use cache::{CacheKey, CacheStats, TtlCache};
pub use comic::{Comic, Pagination, SearchResult};
pub use config::{AppConfig, ConfigError, Transport};
pub use error::{Error, UpstreamKind};
pub use service::{ComicService, ServiceConfig};
pub use source::ComicSource;
pub use stats::{RequestStats, StatsSnapshot};

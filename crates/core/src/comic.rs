//! Comic and search result types.
//!
//! Field names of the serialized shapes are fixed; existing API clients
//! depend on them.

use serde::{Deserialize, Serialize};

/// A normalized comic as served to clients.
///
/// Created once from the upstream payload and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Comic {
    /// Upstream's canonical sequence number.
    pub id: u32,
    pub title: String,
    /// Absolute URL of the artwork.
    pub img: String,
    pub alt: String,
    /// Empty when upstream omits it.
    pub transcript: String,
    pub year: String,
    pub month: String,
    pub day: String,
    pub safe_title: String,
}

impl Comic {
    /// Case-insensitive substring match against title and transcript.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.transcript.to_lowercase().contains(needle)
    }
}

/// Page/limit/offset triple echoed back with every search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    /// `(page - 1) * limit`, widened so it never saturates.
    pub offset: u64,
}

impl Pagination {
    /// Derive the offset for a 1-based page.
    ///
    /// Callers guarantee `page >= 1`.
    pub fn new(page: u32, limit: u32) -> Self {
        let offset = u64::from(page.saturating_sub(1)) * u64::from(limit);
        Self { page, limit, offset }
    }

    /// Slice an ordered list of matches down to this page.
    ///
    /// An offset past the end yields an empty page.
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .skip(usize::try_from(self.offset).unwrap_or(usize::MAX))
            .take(self.limit as usize)
            .cloned()
            .collect()
    }
}

/// Search response: the page of matches plus the total across the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchResult {
    pub query: String,
    pub results: Vec<Comic>,
    pub total: usize,
    pub pagination: Pagination,
}

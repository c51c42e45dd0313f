//! cache_purge tool implementation.
//!
//! Drops expired comics, or every cached comic when `expired_only` is false.

use crate::tools::json_result;
use comics_core::TtlCache;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the cache_purge tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CachePurgeParams {
    /// Only drop entries past their TTL (default: true). Set to false to empty the cache.
    #[serde(default = "default_true")]
    pub expired_only: bool,
}

fn default_true() -> bool {
    true
}

/// Output from the cache_purge tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CachePurgeOutput {
    /// Number of entries removed.
    pub deleted: usize,
    /// Entries left in the cache.
    pub remaining: usize,
}

/// Implementation of the cache_purge tool.
pub fn purge_impl(cache: &TtlCache, params: CachePurgeParams) -> Result<CallToolResult, McpError> {
    let deleted = if params.expired_only { cache.purge_expired() } else { cache.clear() };
    tracing::info!(deleted, expired_only = params.expired_only, "purged comic cache");

    json_result(&CachePurgeOutput { deleted, remaining: cache.len() })
}

//! MCP tool implementations.
//!
//! Each tool returns its payload as pretty-printed JSON text content.

pub mod cache;
pub mod comics;

pub use cache::{CachePurgeOutput, CachePurgeParams, purge_impl, stats_impl};
pub use comics::{ComicGetParams, ComicSearchParams, get_impl, latest_impl, random_impl, search_impl};

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

/// Wrap a serializable payload as a successful tool result.
pub(crate) fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| McpError::internal_error(format!("Failed to serialize output: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
pub(crate) fn result_json(result: &CallToolResult) -> serde_json::Value {
    let content = serde_json::to_value(&result.content[0]).unwrap();
    let text = content.get("text").and_then(|v| v.as_str()).expect("Expected text field in content");
    serde_json::from_str(text).unwrap()
}

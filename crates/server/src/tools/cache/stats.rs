//! cache_stats tool implementation.

use crate::tools::json_result;
use comics_core::TtlCache;
use rmcp::{ErrorData as McpError, model::CallToolResult};

pub fn stats_impl(cache: &TtlCache) -> Result<CallToolResult, McpError> {
    json_result(&cache.stats())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::result_json;
    use std::time::Duration;

    #[test]
    fn test_stats_impl() {
        let cache = TtlCache::with_max_entries(Duration::from_secs(300), 64);
        let output = result_json(&stats_impl(&cache).unwrap());
        assert_eq!(output["entries"], 0);
        assert_eq!(output["ttl_secs"], 300);
        assert_eq!(output["max_entries"], 64);
    }
}

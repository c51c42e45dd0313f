//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the comic service.
use crate::tools::{
    CachePurgeParams, ComicGetParams, ComicSearchParams, get_impl, latest_impl, purge_impl, random_impl, search_impl,
    stats_impl,
};

use comics_core::{ComicService, RequestStats};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use std::sync::Arc;

/// The MCP server handler for the comics service.
#[derive(Clone)]
pub struct ComicsMcpServer {
    service: Arc<ComicService>,
    stats: Arc<RequestStats>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ComicsMcpServer {
    pub fn new(service: Arc<ComicService>, stats: Arc<RequestStats>) -> Self {
        Self { service, stats, tool_router: Self::tool_router() }
    }

    #[tool(description = "Get the newest comic.")]
    async fn comic_latest(&self) -> Result<CallToolResult, McpError> {
        self.stats.record("tool comic_latest");
        latest_impl(&self.service).await
    }

    #[tool(description = "Get a comic by its number.")]
    async fn comic_get(&self, params: Parameters<ComicGetParams>) -> Result<CallToolResult, McpError> {
        self.stats.record("tool comic_get");
        get_impl(&self.service, params.0).await
    }

    #[tool(description = "Get a uniformly random comic from the archive.")]
    async fn comic_random(&self) -> Result<CallToolResult, McpError> {
        self.stats.record("tool comic_random");
        random_impl(&self.service).await
    }

    /// Search recent comics.
    ///
    /// Only the most recent window of comics is scanned, newest first.
    #[tool(
        description = "Search the most recent comics by title and transcript. Returns a page of matches, newest first."
    )]
    async fn comic_search(&self, params: Parameters<ComicSearchParams>) -> Result<CallToolResult, McpError> {
        self.stats.record("tool comic_search");
        search_impl(&self.service, params.0).await
    }

    #[tool(description = "Purge expired comics from the cache, or empty it with expired_only=false.")]
    async fn cache_purge(&self, params: Parameters<CachePurgeParams>) -> Result<CallToolResult, McpError> {
        self.stats.record("tool cache_purge");
        purge_impl(self.service.cache(), params.0)
    }

    #[tool(description = "Report cache size, TTL and capacity.")]
    async fn cache_stats(&self) -> Result<CallToolResult, McpError> {
        self.stats.record("tool cache_stats");
        stats_impl(self.service.cache())
    }
}

impl ServerHandler for ComicsMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "comics-api".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some("Fetch, randomly pick and search xkcd comics.".into()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}

//! comics-api server entry point.
//!
//! Boots the comic service and exposes it either as a JSON HTTP API or as an
//! MCP server on stdio, depending on the configured transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use anyhow::Result;
use comics_client::{XkcdClient, XkcdConfig};
use comics_core::{AppConfig, ComicService, ServiceConfig, Transport, TtlCache};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod error;
mod handler;
mod http;
mod state;
#[cfg(test)]
mod testing;
mod tools;
mod validation;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    tracing::info!(
        base_url = %config.base_url,
        cache_ttl_secs = config.cache_ttl_secs,
        search_window = config.search_window,
        "loaded configuration"
    );

    let client = XkcdClient::new(XkcdConfig::from(&config))?;
    let cache = Arc::new(TtlCache::with_max_entries(config.cache_ttl(), config.cache_max_entries));
    let service = Arc::new(ComicService::new(Arc::new(client), cache, ServiceConfig::from(&config)));
    let state = state::AppState::new(Arc::clone(&service), http::rate_limit::RateLimitConfig::from(&config));

    match config.transport {
        Transport::Http => {
            let addr: SocketAddr = config.bind_addr.parse()?;
            http::serve(state, addr).await?;
        }
        Transport::Stdio => {
            tracing::info!("Starting comics MCP server on stdio transport");

            let handler = handler::ComicsMcpServer::new(service, state.stats);
            let server = serve_server(handler, stdio()).await?;
            server.waiting().await?;
        }
    }

    Ok(())
}

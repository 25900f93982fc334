//! People admin gateway server.
//!
//! Wires configuration, the upstream people API client, the router, and the
//! hyper server, with graceful shutdown on Ctrl+C.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use people_admin_api::{client::PeopleClient, router::Router, server::Server};
use people_form_core::config::GatewayConfig;
use tokio::signal;
use tracing::{error, info};

/// Command-line arguments for the gateway server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Base URL of the upstream people API
    #[arg(long, default_value = "http://localhost:3000")]
    api_base_url: String,

    /// Request body read timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    request_timeout_ms: u64,

    /// Upstream call timeout in milliseconds
    #[arg(long, default_value_t = 10000)]
    upstream_timeout_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    // Create configuration
    let config = Arc::new(GatewayConfig {
        upstream_base_url: args.api_base_url.clone(),
        request_timeout_ms: args.request_timeout_ms,
        upstream_timeout_ms: args.upstream_timeout_ms,
    });

    // Create upstream client and router
    let client = Arc::new(PeopleClient::new(&config)?);
    let router = Router::new(config, client);

    // Create server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let server = Server::new(addr, router);

    info!("Starting people admin gateway...");
    info!("  Host: {}", args.host);
    info!("  Port: {}", args.port);
    info!("  Upstream API: {}", args.api_base_url);
    info!("  Request timeout: {} ms", args.request_timeout_ms);
    info!("  Upstream timeout: {} ms", args.upstream_timeout_ms);

    // Start server with graceful shutdown
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.serve().await {
            error!("Server error: {}", e);
        }
    });

    // Wait for Ctrl+C
    signal::ctrl_c().await?;
    info!("Shutting down gateway...");
    server_handle.abort();

    Ok(())
}

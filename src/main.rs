//! Postgres MCP Server entry point.
//!
//! Binds the HTTP listener, wires the database pool into the dispatcher, and
//! serves until SIGINT/SIGTERM.

use anyhow::Result;
use pg_mcp_server::auth::AuthGate;
use pg_mcp_server::database::{build_pool, PostgresExecutor};
use pg_mcp_server::{transport, Config, McpServer};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = Config::from_env()?;

    let pool = build_pool(&config)?;
    let executor = Arc::new(PostgresExecutor::new(pool));
    let server = Arc::new(McpServer::new(
        executor,
        AuthGate::new(config.secret_token.clone()),
    ));

    let app = transport::router(server, config.http.enable_cors);

    let addr = format!("{}:{}", config.http.host, config.http.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Postgres MCP Server v{} listening on http://{}", env!("CARGO_PKG_VERSION"), addr);
    info!("MCP endpoint: http://{}/mcp", addr);
    info!("Health endpoint: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize the tracing subscriber, honoring `RUST_LOG`.
fn init_logging() {
    let filter = std::env::var("RUST_LOG")
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("info,pg_mcp_server=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Resolve when SIGINT or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("SIGINT received"),
        _ = terminate => info!("SIGTERM received"),
    }
}

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{config::ApiServerConfig, errors::Error};

use super::routes::{build_router, ApiState};

/// Bind and serve the API until Ctrl+C.
pub async fn start_api_server(config: ApiServerConfig, state: ApiState) -> crate::Result<()> {
    let addr: SocketAddr = config
        .socket_address()
        .parse()
        .map_err(|e| Error::config(format!("Invalid API address: {}", e)))?;

    match config.static_dir.as_deref() {
        Some(dir) if !dir.join("index.html").exists() => warn!(
            static_dir = %dir.display(),
            "Static directory has no index.html; client-side routes will 404"
        ),
        Some(dir) => info!(static_dir = %dir.display(), "Serving single-page application"),
        None => info!("No static directory configured; serving API routes only"),
    }

    let router: Router = build_router(state, config.static_dir.as_deref());

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::io(e, format!("Failed to bind API server to {}", addr)))?;

    info!(address = %addr, "Starting HTTP API server");
    run_http_server(listener, router).await?;

    info!("API server shutdown completed");
    Ok(())
}

async fn run_http_server(listener: TcpListener, router: Router) -> crate::Result<()> {
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "API server shutdown listener failed");
            }
        })
        .await
        .map_err(|e| Error::io(e, "API server error"))
}

//! HTTP surface over [`StatsClient`]: one route per source plus the
//! combined lookup.

mod error;
mod routes;

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub use error::ApiError;

use crate::client::StatsClient;

/// Build the application router.
pub fn router(client: Arc<StatsClient>) -> Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(client)
}

/// Serve until SIGINT/SIGTERM, then close pooled browser sessions.
pub async fn serve(listener: TcpListener, client: Arc<StatsClient>) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("server listening on {addr}");
    }

    axum::serve(listener, router(client.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    client.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received, starting graceful shutdown");
}

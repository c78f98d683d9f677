//! HTTP API server for the contacts service.
//!
//! Builds the axum router over a shared [`ContactManager`] and runs it until
//! a shutdown signal arrives.

pub mod handlers;
pub mod responses;
pub mod routes;

pub use responses::{ApiError, Created, ProblemDetails};
pub use routes::routes;

use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::services::ContactManager;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub contact_manager: Arc<dyn ContactManager>,
}

/// Build the full application router with middleware and state.
pub fn app(contact_manager: Arc<dyn ContactManager>) -> Router {
    let state = AppState { contact_manager };

    Router::new()
        .merge(routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP API server.
///
/// Binds `addr` and serves until Ctrl-C or SIGTERM, then drains in-flight
/// requests before returning.
pub async fn run_server(addr: SocketAddr, contact_manager: Arc<dyn ContactManager>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("HTTP API listening on {}", addr);

    axum::serve(listener, app(contact_manager))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
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
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received");
}

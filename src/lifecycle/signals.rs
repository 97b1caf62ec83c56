//! OS signal handling.
//!
//! # Responsibilities
//! - Wait for SIGINT/SIGTERM and trigger graceful shutdown
//! - Rebuild the routing tree on SIGHUP
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - SIGHUP triggers a tree rebuild, not shutdown
//! - A handler that cannot be installed is logged and never fires

use std::sync::Arc;

use crate::dispatch::SharedDispatcher;
use crate::lifecycle::Shutdown;

/// Resolve once SIGINT or (on unix) SIGTERM arrives.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "Failed to install Ctrl+C handler");
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
            Err(error) => {
                tracing::error!(%error, "Failed to install SIGTERM handler");
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
    tracing::info!("Shutdown signal received");
}

/// Trigger `shutdown` when a shutdown signal arrives.
pub fn spawn_shutdown_handler(shutdown: Arc<Shutdown>) {
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.trigger();
    });
}

/// Rebuild `dispatcher` on every SIGHUP until `shutdown` fires.
#[cfg(unix)]
pub fn spawn_reload_handler(dispatcher: Arc<SharedDispatcher>, shutdown: &Shutdown) {
    use tokio::signal::unix::{signal, SignalKind};

    let mut shutdown_rx = shutdown.subscribe();
    tokio::spawn(async move {
        let mut hangup = match signal(SignalKind::hangup()) {
            Ok(stream) => stream,
            Err(error) => {
                tracing::error!(%error, "Failed to install SIGHUP handler");
                return;
            }
        };
        loop {
            tokio::select! {
                _ = hangup.recv() => {
                    tracing::info!("SIGHUP received, rebuilding dispatch tree");
                    let _ = dispatcher.rebuild();
                }
                _ = shutdown_rx.recv() => break,
            }
        }
    });
}

#[cfg(not(unix))]
pub fn spawn_reload_handler(_dispatcher: Arc<SharedDispatcher>, _shutdown: &Shutdown) {}

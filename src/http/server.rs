//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router; every path goes to the dispatch handler
//! - Wire up middleware (request ID, tracing)
//! - Bind server to listener and stop on shutdown
//! - Record a metric per dispatched request

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, Uri},
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::dispatch::{Dispatch, RequestPath};
use crate::http::request::{MakeRequestUuid, RequestIdExt, X_REQUEST_ID};
use crate::http::response::{bad_path, dispatch_response};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<dyn Dispatch>,
}

/// HTTP front answering every request with its dispatch result.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    pub fn new(config: AppConfig, dispatcher: Arc<dyn Dispatch>) -> Self {
        let router = Self::build_router(AppState { dispatcher });
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state)
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request.request_id(),
                )
            }))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            www_root = %self.config.dispatch.www_root.display(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Dispatch the request path and describe the result.
async fn dispatch_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let path = match RequestPath::parse(uri.path()) {
        Ok(path) => path,
        Err(error) => {
            tracing::debug!(path = %uri.path(), %error, "Rejecting undecodable path");
            return bad_path(error);
        }
    };

    let result = state.dispatcher.dispatch(path.decoded(), path.segments());
    metrics::record_dispatch(result.status);
    tracing::debug!(
        path = %path.decoded(),
        status = %result.status,
        matched = ?result.matched,
        canonical = ?result.canonical,
        "Dispatched"
    );

    dispatch_response(result, uri.query())
}

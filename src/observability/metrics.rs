//! Metrics collection and exposition.
//!
//! # Metrics
//! - `dispatch_requests_total` (counter): dispatches by result status
//! - `dispatch_tree_builds_total` (counter): tree builds by outcome
//! - `dispatch_tree_nodes` (gauge): nodes in the active tree
//! - `dispatch_tree_build_seconds` (histogram): build duration
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade and is a no-op until an
//!   exporter is installed
//! - The Prometheus exporter serves its own scrape endpoint

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::dispatch::DispatchStatus;

/// Install the Prometheus exporter listening on `addr`.
///
/// Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(error) => tracing::error!(address = %addr, %error, "Failed to start metrics endpoint"),
    }
}

/// Record one dispatched request.
pub fn record_dispatch(status: DispatchStatus) {
    metrics::counter!("dispatch_requests_total", "status" => status.as_str()).increment(1);
}

/// Record a tree build that started at `started`.
pub fn record_tree_build(succeeded: bool, started: Instant, nodes: usize) {
    let outcome = if succeeded { "success" } else { "failure" };
    metrics::counter!("dispatch_tree_builds_total", "outcome" => outcome).increment(1);
    metrics::histogram!("dispatch_tree_build_seconds").record(started.elapsed().as_secs_f64());
    if succeeded {
        metrics::gauge!("dispatch_tree_nodes").set(nodes as f64);
    }
}

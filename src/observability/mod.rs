//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! dispatch, http, lifecycle
//!     → logging.rs (tracing subscriber, stdout)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → log aggregation (stdout)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the trace span of every request
//! - Metrics are cheap and safe to record without an exporter

pub mod logging;
pub mod metrics;

//! Filesystem-backed request dispatcher.
//!
//! Maps URL paths onto files under a www root: exact files, dynamic files
//! with negotiated extensions, `%name` wildcard directories and leaves,
//! directory indices and canonical redirects. See [`dispatch`] for the
//! matching rules.

pub mod config;
pub mod dispatch;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::AppConfig;
pub use dispatch::{Dispatch, DispatchResult, DispatchStatus, SharedDispatcher};
pub use http::HttpServer;
pub use lifecycle::Shutdown;

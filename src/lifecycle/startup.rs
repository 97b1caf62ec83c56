//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the initial routing tree from validated configuration
//! - Start the source watcher when reload on change is enabled
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener binds only after the tree is built

use std::sync::Arc;

use notify::RecommendedWatcher;

use crate::config::{AppConfig, SourceWatcher};
use crate::dispatch::{BuildError, SharedDispatcher};

/// Startup failures.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to build dispatch tree: {0}")]
    Build(#[from] BuildError),

    #[error("failed to watch www root: {0}")]
    Watch(#[from] notify::Error),
}

/// A ready dispatcher plus the watcher keeping it fresh, if any.
pub struct Dispatching {
    pub dispatcher: Arc<SharedDispatcher>,
    /// Dropping this stops reloads.
    pub watcher: Option<RecommendedWatcher>,
}

/// Build the dispatcher described by `config`.
pub fn start_dispatching(config: &AppConfig) -> Result<Dispatching, StartupError> {
    let dispatcher = Arc::new(SharedDispatcher::new(config.dispatch.to_options())?);

    let watcher = if config.dispatch.changes_reload {
        let www_root = dispatcher.snapshot().www_root().to_path_buf();
        Some(SourceWatcher::new(&www_root, dispatcher.clone()).run()?)
    } else {
        None
    };

    Ok(Dispatching {
        dispatcher,
        watcher,
    })
}

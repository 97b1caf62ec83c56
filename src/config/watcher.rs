//! Source watcher for hot reload of the routing tree.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::dispatch::SharedDispatcher;

/// Watches the www root and rebuilds the dispatcher when it changes.
pub struct SourceWatcher {
    path: PathBuf,
    dispatcher: Arc<SharedDispatcher>,
}

impl SourceWatcher {
    pub fn new(path: &Path, dispatcher: Arc<SharedDispatcher>) -> Self {
        Self {
            path: path.to_path_buf(),
            dispatcher,
        }
    }

    /// Start watching in a background thread.
    ///
    /// Watching stops when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let dispatcher = self.dispatcher.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if changes_tree(&event.kind) => {
                    tracing::info!(paths = ?event.paths, "Source change detected, rebuilding");
                    // A failed rebuild is logged and keeps the current tree.
                    let _ = dispatcher.rebuild();
                }
                Ok(_) => {}
                Err(error) => tracing::error!(%error, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::Recursive)?;

        tracing::info!(path = ?self.path, "Source watcher started");
        Ok(watcher)
    }
}

fn changes_tree(kind: &EventKind) -> bool {
    kind.is_create() || kind.is_modify() || kind.is_remove()
}

//! Hot-swappable dispatcher.
//!
//! # Data Flow
//! ```text
//! request → snapshot() → Arc<TreeDispatcher> → dispatch
//!
//! watcher / SIGHUP → rebuild()
//!     → TreeDispatcher::build (same options)
//!     → ok:  atomic swap, new requests see the new tree
//!     → err: previous tree stays active
//! ```

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::dispatch::error::BuildError;
use crate::dispatch::options::DispatcherOptions;
use crate::dispatch::result::DispatchResult;
use crate::dispatch::tree::TreeDispatcher;
use crate::dispatch::Dispatch;

/// A [`TreeDispatcher`] that can be rebuilt while requests are in flight.
///
/// Requests holding an older snapshot finish against it; the swap never
/// blocks readers.
#[derive(Debug)]
pub struct SharedDispatcher {
    options: DispatcherOptions,
    current: ArcSwap<TreeDispatcher>,
}

impl SharedDispatcher {
    /// Build the initial tree.
    pub fn new(options: DispatcherOptions) -> Result<Self, BuildError> {
        let tree = TreeDispatcher::build(&options)?;
        Ok(Self {
            options,
            current: ArcSwap::from_pointee(tree),
        })
    }

    /// The tree currently serving requests.
    pub fn snapshot(&self) -> Arc<TreeDispatcher> {
        self.current.load_full()
    }

    /// Rebuild from the www root and swap the result in.
    pub fn rebuild(&self) -> Result<(), BuildError> {
        match TreeDispatcher::build(&self.options) {
            Ok(tree) => {
                self.current.store(Arc::new(tree));
                Ok(())
            }
            Err(error) => {
                tracing::error!(%error, "Dispatch tree rebuild failed. Keeping current tree.");
                Err(error)
            }
        }
    }

    pub fn options(&self) -> &DispatcherOptions {
        &self.options
    }
}

impl Dispatch for SharedDispatcher {
    fn dispatch(&self, path: &str, segments: &[String]) -> DispatchResult {
        self.current.load().dispatch(path, segments)
    }
}

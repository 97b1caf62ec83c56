//! Filesystem-backed request dispatch.
//!
//! Maps a URL path onto a resource file under a www root. The directory
//! layout is the routing table: files answer by name, dynamic files also
//! answer with any extension, and entries starting with `%` capture request
//! segments into named wildcards.
//!
//! # Data Flow
//! ```text
//! DispatcherOptions (root, capabilities, collision policy)
//!     → builder.rs (walk the root once, classify, resolve collisions)
//!     → Node tree, wrapped in TreeDispatcher
//!     → matcher.rs (walk segments, most specific wins)
//!     → DispatchResult { status, match, wildcards, extension, canonical }
//!
//! LiveDispatcher runs the same matcher against fresh directory listings.
//! SharedDispatcher swaps rebuilt trees in while requests are in flight.
//! ```
//!
//! # Design Decisions
//! - Build failures are errors; request-time failures are `missing`
//! - Trees are immutable once built and shared without locks
//! - Capabilities (dynamic check, skipper, typecasters, collisions) are
//!   injected traits with ready-made implementations

pub mod builder;
pub mod collision;
pub mod error;
pub mod filters;
pub mod index;
pub mod live;
mod matcher;
pub mod node;
pub mod options;
pub mod path;
pub mod result;
pub mod shared;
pub mod slug;
pub mod tree;

pub use collision::{CollisionAction, CollisionFn, CollisionHandler, CollisionPolicy};
pub use error::BuildError;
pub use filters::{DynamicExtensions, EntrySkipper, IsDynamic, SkipHidden, SkipNothing, TypecasterRegistry};
pub use live::LiveDispatcher;
pub use node::{Children, Node, NodeKind, Wildcard};
pub use options::DispatcherOptions;
pub use path::{PathError, RequestPath};
pub use result::{DispatchResult, DispatchStatus};
pub use shared::SharedDispatcher;
pub use tree::TreeDispatcher;

/// Default index candidates, in priority order.
pub const DEFAULT_INDICES: [&str; 6] = [
    "index.html",
    "index.json",
    "index",
    "index.html.spt",
    "index.json.spt",
    "index.spt",
];

/// Resolves request paths to resources.
pub trait Dispatch: Send + Sync {
    /// Match already split `segments`; `path` is the decoded path they came
    /// from and is used to build canonical paths.
    fn dispatch(&self, path: &str, segments: &[String]) -> DispatchResult;

    /// Decode a raw URL path and dispatch it. Undecodable paths are missing.
    fn dispatch_raw(&self, raw: &str) -> DispatchResult {
        match RequestPath::parse(raw) {
            Ok(path) => self.dispatch(path.decoded(), path.segments()),
            Err(error) => {
                tracing::debug!(raw, %error, "Undecodable request path");
                DispatchResult::missing()
            }
        }
    }
}

//! Precomputed dispatcher: the production variant.

use std::borrow::Cow;
use std::path::Path;
use std::time::Instant;

use crate::dispatch::builder::TreeBuilder;
use crate::dispatch::error::BuildError;
use crate::dispatch::matcher::{walk, Namespace};
use crate::dispatch::node::{Children, Node};
use crate::dispatch::options::DispatcherOptions;
use crate::dispatch::result::DispatchResult;
use crate::dispatch::Dispatch;
use crate::observability::metrics;

/// Dispatches against a routing tree built once from the www root.
///
/// Matching performs no I/O and never mutates the tree, so one instance can
/// serve any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct TreeDispatcher {
    tree: Node,
}

impl TreeDispatcher {
    /// Walk the www root and build the routing tree.
    pub fn build(options: &DispatcherOptions) -> Result<Self, BuildError> {
        let started = Instant::now();
        let tree = match TreeBuilder::new(options).and_then(|builder| builder.build()) {
            Ok(tree) => tree,
            Err(error) => {
                metrics::record_tree_build(false, started, 0);
                return Err(error);
            }
        };
        let nodes = tree.count();
        metrics::record_tree_build(true, started, nodes);
        tracing::info!(
            www_root = %tree.path.display(),
            nodes,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Dispatch tree built"
        );
        Ok(Self { tree })
    }

    /// Canonical www root.
    pub fn www_root(&self) -> &Path {
        &self.tree.path
    }

    /// The root node of the routing tree.
    pub fn tree(&self) -> &Node {
        &self.tree
    }
}

impl Namespace for TreeDispatcher {
    fn root(&self) -> &Node {
        &self.tree
    }

    fn children<'a>(&'a self, node: &Cow<'a, Node>) -> Option<Cow<'a, Children>> {
        match node {
            Cow::Borrowed(node) => {
                let node: &'a Node = *node;
                Some(Cow::Borrowed(&node.children))
            }
            Cow::Owned(node) => Some(Cow::Owned(node.children.clone())),
        }
    }
}

impl Dispatch for TreeDispatcher {
    fn dispatch(&self, path: &str, segments: &[String]) -> DispatchResult {
        walk(self, path, segments).confined_to(self.www_root())
    }
}

//! Live dispatcher: consults the filesystem on every request.
//!
//! Same matching rules as [`TreeDispatcher`](crate::dispatch::TreeDispatcher),
//! but each directory along the request path is listed and classified at
//! dispatch time. Useful for tests and low-traffic development setups where
//! rebuilding a tree on every change is not wanted.
//!
//! Wildcard name reuse across a branch is not detected here, and a
//! directory whose entries collide under a raising policy dispatches as
//! missing instead of failing a build.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::dispatch::builder::TreeBuilder;
use crate::dispatch::error::BuildError;
use crate::dispatch::matcher::{walk, Namespace};
use crate::dispatch::node::{Children, Node, NodeKind};
use crate::dispatch::options::DispatcherOptions;
use crate::dispatch::result::DispatchResult;
use crate::dispatch::Dispatch;

#[derive(Debug)]
pub struct LiveDispatcher {
    options: DispatcherOptions,
    root: Node,
}

impl LiveDispatcher {
    /// Fails only when the www root cannot be resolved.
    pub fn new(options: DispatcherOptions) -> Result<Self, BuildError> {
        let root = options.canonical_root()?;
        Ok(Self {
            options,
            root: Node::new(root, NodeKind::Directory),
        })
    }

    pub fn www_root(&self) -> &Path {
        &self.root.path
    }

    fn scan(&self, dir: &Path) -> Option<Children> {
        let builder = TreeBuilder::new(&self.options).ok()?;
        match builder.scan(dir, &HashMap::<String, PathBuf>::new(), false) {
            Ok(children) => Some(children),
            Err(error) => {
                tracing::debug!(dir = %dir.display(), %error, "Live scan failed");
                None
            }
        }
    }
}

impl Namespace for LiveDispatcher {
    fn root(&self) -> &Node {
        &self.root
    }

    fn children<'a>(&'a self, node: &Cow<'a, Node>) -> Option<Cow<'a, Children>> {
        self.scan(&node.path).map(Cow::Owned)
    }
}

impl Dispatch for LiveDispatcher {
    fn dispatch(&self, path: &str, segments: &[String]) -> DispatchResult {
        walk(self, path, segments).confined_to(self.www_root())
    }
}

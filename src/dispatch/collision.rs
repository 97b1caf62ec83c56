//! Slug collision policies.
//!
//! # Responsibilities
//! - Decide what happens when two sibling entries claim the same slug
//!
//! # Design Decisions
//! - Policies are pure: they only look at the two nodes involved
//! - Outcomes are a closed enum; the builder matches them exhaustively
//! - Any `Fn(&str, &Node, &Node) -> CollisionAction` can stand in for the
//!   built-in policies

use serde::{Deserialize, Serialize};

use crate::dispatch::node::{Node, NodeKind};

/// What the tree builder does with a colliding entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionAction {
    /// Keep the entry already registered; drop the new one.
    IgnoreSecond,
    /// Abort the build with a slug collision error.
    Raise,
    /// Register the new entry in place of the old one.
    ReplaceFirst,
}

/// Decides slug collisions during tree construction.
pub trait CollisionHandler: Send + Sync + std::fmt::Debug {
    fn resolve(&self, slug: &str, existing: &Node, candidate: &Node) -> CollisionAction;
}

/// Built-in collision policies, selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// First entry wins silently.
    #[default]
    Permissive,
    /// No two entries may share a slug.
    Strict,
    /// A static file may shadow the dynamic resource of the same name
    /// (`file.js` over `file.js.spt`); everything else raises.
    Hybrid,
}

impl CollisionHandler for CollisionPolicy {
    fn resolve(&self, _slug: &str, existing: &Node, candidate: &Node) -> CollisionAction {
        match self {
            CollisionPolicy::Permissive => CollisionAction::IgnoreSecond,
            CollisionPolicy::Strict => CollisionAction::Raise,
            CollisionPolicy::Hybrid => {
                if static_shadows_dynamic(existing, candidate) {
                    CollisionAction::IgnoreSecond
                } else {
                    CollisionAction::Raise
                }
            }
        }
    }
}

/// True when `candidate` is `existing`'s path plus one more extension.
fn static_shadows_dynamic(existing: &Node, candidate: &Node) -> bool {
    if existing.kind != NodeKind::Static || candidate.kind != NodeKind::Dynamic {
        return false;
    }
    let (Some(existing), Some(candidate)) = (existing.path.to_str(), candidate.path.to_str()) else {
        return false;
    };
    candidate
        .strip_prefix(existing)
        .and_then(|rest| rest.strip_prefix('.'))
        .is_some_and(|ext| !ext.is_empty() && !ext.contains('.'))
}

/// Wrapper that lets a closure act as a [`CollisionHandler`].
pub struct CollisionFn<F>(pub F);

impl<F> std::fmt::Debug for CollisionFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CollisionFn")
    }
}

impl<F> CollisionHandler for CollisionFn<F>
where
    F: Fn(&str, &Node, &Node) -> CollisionAction + Send + Sync,
{
    fn resolve(&self, slug: &str, existing: &Node, candidate: &Node) -> CollisionAction {
        (self.0)(slug, existing, candidate)
    }
}

//! Path matching.
//!
//! # Responsibilities
//! - Walk a routing namespace segment by segment
//! - Apply the "most specific wins" rules, in order:
//!   exact file, negotiated dynamic file, exact directory, wildcard leaf,
//!   wildcard directory
//! - Resolve directory indices, trailing-slash canonicals and unindexed
//!   directories once the walk ends
//!
//! # Design Decisions
//! - One algorithm, generic over [`Namespace`]: the precomputed tree hands
//!   out borrowed children, the live variant hands out freshly scanned ones
//! - Walk state is an explicit accumulator threaded through the loop
//! - No errors: every failure is the `missing` status

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::dispatch::node::{Children, Node, NodeKind};
use crate::dispatch::result::{DispatchResult, DispatchStatus};

/// Wildcard leaves of one directory, by sub-extension.
type Leaves = BTreeMap<Option<String>, Node>;

/// A routing namespace the matcher can walk.
pub(crate) trait Namespace {
    /// The node for the www root.
    fn root(&self) -> &Node;

    /// Children of the directory `node`. `None` means the directory cannot
    /// be read, which dispatches as missing.
    fn children<'a>(&'a self, node: &Cow<'a, Node>) -> Option<Cow<'a, Children>>;
}

/// State accumulated while walking.
#[derive(Default)]
struct Walk<'a> {
    wildcards: BTreeMap<String, String>,
    extension: Option<String>,
    canonical: Option<String>,
    /// The most recent wildcard leaf table seen on the way down.
    fallback: Option<Cow<'a, Leaves>>,
}

impl<'a> Walk<'a> {
    fn bind(&mut self, node: &Node, value: &str) {
        if let Some(wildcard) = &node.wildcard {
            self.wildcards.insert(wildcard.name.clone(), value.to_string());
        }
    }

    /// Answer with a wildcard leaf, binding the rest of the request from
    /// `depth` onward.
    fn fall_back(mut self, segments: &[String], depth: usize) -> DispatchResult {
        let Some(leaves) = self.fallback.take() else {
            return DispatchResult {
                status: DispatchStatus::Missing,
                matched: None,
                wildcards: self.wildcards,
                extension: None,
                canonical: self.canonical,
            };
        };

        let requested = segments
            .last()
            .and_then(|segment| segment.rsplit_once('.'))
            .map(|(_, ext)| ext.to_string());
        let leaf = requested
            .and_then(|ext| leaves.get(&Some(ext)))
            .or_else(|| leaves.get(&None));
        let Some(leaf) = leaf else {
            tracing::trace!("No wildcard leaf answers the requested extension");
            return DispatchResult {
                status: DispatchStatus::Missing,
                matched: None,
                wildcards: self.wildcards,
                extension: None,
                canonical: None,
            };
        };

        let tail = segments[depth..].join("/");
        let value = match &leaf.extension {
            Some(ext) => tail
                .strip_suffix(ext.as_str())
                .and_then(|rest| rest.strip_suffix('.'))
                .unwrap_or(tail.as_str()),
            None => tail.as_str(),
        };
        self.bind(leaf, value);
        tracing::trace!(leaf = %leaf.path.display(), "Falling back to wildcard leaf");
        DispatchResult::okay(&leaf.path, self.wildcards, None, None)
    }
}

/// Pick a child out of `children` without cloning borrowed trees.
fn select<'a>(
    children: &Cow<'a, Children>,
    pick: impl for<'c> FnOnce(&'c Children) -> Option<&'c Node>,
) -> Option<Cow<'a, Node>> {
    match children {
        Cow::Borrowed(children) => {
            let children: &'a Children = *children;
            pick(children).map(Cow::Borrowed)
        }
        Cow::Owned(children) => pick(children).cloned().map(Cow::Owned),
    }
}

fn leaf_table<'a>(children: &Cow<'a, Children>) -> Cow<'a, Leaves> {
    match children {
        Cow::Borrowed(children) => {
            let children: &'a Children = *children;
            Cow::Borrowed(&children.wildcard_leaves)
        }
        Cow::Owned(children) => Cow::Owned(children.wildcard_leaves.clone()),
    }
}

/// Match `segments` against `namespace`.
///
/// `path` is the literal request path the segments came from; it is used to
/// build canonical paths.
pub(crate) fn walk<'a, N: Namespace>(namespace: &'a N, path: &str, segments: &[String]) -> DispatchResult {
    let root_only = [String::new()];
    let segments = if segments.is_empty() { &root_only[..] } else { segments };
    let last = segments.len() - 1;

    let mut state = Walk::default();
    let mut node: Cow<'a, Node> = Cow::Borrowed(namespace.root());

    for (depth, segment) in segments.iter().enumerate() {
        let Some(children) = namespace.children(&node) else {
            return DispatchResult::missing();
        };
        let is_last = depth == last;

        // Exact file, or the index for an empty segment.
        if segment.is_empty() {
            if children.index.is_some() {
                if is_last {
                    break;
                }
                return state.fall_back(segments, depth);
            }
        } else if is_last {
            if let Some(file) = select(&children, |c| c.files.get(segment.as_str())) {
                if children.index.as_deref() == Some(segment.as_str()) {
                    // The canonical path of `/index.html` is `/`.
                    let canonical = path.strip_suffix(segment.as_str()).unwrap_or(path);
                    state.canonical = Some(canonical.to_string());
                }
                node = file;
                break;
            }
        }

        // Negotiated dynamic file: `foo.spt` answers `/foo.json`.
        if let Some((base, ext)) = segment.rsplit_once('.') {
            let dynamic = select(&children, |c| {
                c.files.get(base).filter(|file| file.kind == NodeKind::Dynamic)
            });
            if let Some(file) = dynamic {
                if file.file_name() == Some(segment.as_str()) {
                    // Never serve the source of a dynamic resource.
                    return DispatchResult::missing();
                }
                if is_last {
                    state.extension = Some(ext.to_string());
                    node = file;
                    continue;
                }
            }
        }

        if let Some(dir) = select(&children, |c| c.dirs.get(segment.as_str())) {
            node = dir;
            continue;
        }

        if !children.wildcard_leaves.is_empty() {
            let leaves = leaf_table(&children);
            if segment.is_empty() {
                if let Some(leaf) = leaves.values().next() {
                    state.bind(leaf, segment);
                    return DispatchResult::okay(&leaf.path, state.wildcards, None, None);
                }
            }
            state.fallback = Some(leaves);
            if is_last {
                return state.fall_back(segments, depth);
            }
        }

        if let Some(dir) = select(&children, |c| c.wildcard_dir.as_deref()) {
            state.bind(&dir, segment);
            node = dir;
            continue;
        }

        if is_last && segment.is_empty() {
            break;
        }
        return state.fall_back(segments, depth);
    }

    if node.is_dir() {
        state.canonical = if segments[last].is_empty() {
            None
        } else {
            Some(format!("{path}/"))
        };
        let Some(children) = namespace.children(&node) else {
            return DispatchResult::missing();
        };
        match select(&children, |c| c.index.as_ref().and_then(|slug| c.files.get(slug))) {
            Some(index) => node = index,
            // e.g. `/bar` matched to an empty wildcard directory `%foo/`
            None if !state.wildcards.is_empty() => return state.fall_back(segments, last),
            None => {
                return DispatchResult::unindexed(
                    &node.path,
                    state.wildcards,
                    state.extension,
                    state.canonical,
                )
            }
        }
    }

    DispatchResult::okay(&node.path, state.wildcards, state.extension, state.canonical)
}

//! Routing tree construction.
//!
//! # Responsibilities
//! - Enumerate the www root once, in sorted order
//! - Classify entries (directory, dynamic leaf, static leaf)
//! - Detect wildcard entries and their sub-extensions
//! - Apply the collision policy to sibling entries sharing a slug
//! - Mark each directory's index file
//!
//! # Design Decisions
//! - Entries resolving outside the www root are dropped silently
//! - Dangling symlinks and entries that vanish mid-scan are dropped
//! - Wildcard names are checked per branch: a name bound by an ancestor
//!   wildcard directory cannot be bound again below it

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::dispatch::collision::CollisionAction;
use crate::dispatch::error::BuildError;
use crate::dispatch::index::find_index;
use crate::dispatch::node::{Children, Node, NodeKind};
use crate::dispatch::options::DispatcherOptions;
use crate::dispatch::slug::{parse_wildcard, slug_for, WILDCARD_PREFIX};

/// Wildcard names bound along the current branch, with the directory that
/// declared each one.
type Bindings = HashMap<String, PathBuf>;

/// Walks a www root and produces routing nodes.
pub struct TreeBuilder<'o> {
    options: &'o DispatcherOptions,
    root: PathBuf,
}

impl<'o> TreeBuilder<'o> {
    /// Prepare a builder; fails when the www root cannot be resolved.
    pub fn new(options: &'o DispatcherOptions) -> Result<Self, BuildError> {
        let root = options.canonical_root()?;
        Ok(Self { options, root })
    }

    /// Canonical www root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Build the complete tree under the www root.
    pub fn build(&self) -> Result<Node, BuildError> {
        let mut root = Node::new(self.root.clone(), NodeKind::Directory);
        root.children = self.scan(&self.root, &Bindings::new(), true)?;
        Ok(root)
    }

    /// Classify the entries of `dir`.
    ///
    /// With `recurse` unset, directory children are returned without their
    /// own children.
    pub(crate) fn scan(
        &self,
        dir: &Path,
        bindings: &Bindings,
        recurse: bool,
    ) -> Result<Children, BuildError> {
        let mut children = Children::default();
        let index = find_index(dir, &self.options.indices);

        for name in list_dir(dir)? {
            if self.options.skipper.skip(&name, dir) {
                continue;
            }
            let joined = dir.join(&name);
            let path = match joined.canonicalize() {
                Ok(path) => path,
                Err(error) => {
                    tracing::debug!(path = %joined.display(), %error, "Skipping unresolvable entry");
                    continue;
                }
            };
            if !path.starts_with(&self.root) {
                tracing::debug!(
                    path = %joined.display(),
                    target = %path.display(),
                    "Skipping entry outside the www root"
                );
                continue;
            }

            let kind = if path.is_dir() {
                NodeKind::Directory
            } else if self.options.is_dynamic.is_dynamic(&name) {
                NodeKind::Dynamic
            } else {
                NodeKind::Static
            };
            let slug = slug_for(&name, kind);
            let mut node = Node::new(path, kind);

            if slug.starts_with(WILDCARD_PREFIX) {
                if let Some((wildcard, extension)) =
                    parse_wildcard(slug, kind, &*self.options.typecasters)
                {
                    if let Some(first) = bindings.get(&wildcard.name) {
                        return Err(BuildError::WildcardCollision {
                            name: wildcard.name,
                            first: first.clone(),
                            second: dir.to_path_buf(),
                        });
                    }
                    if kind != NodeKind::Directory {
                        node.wildcard = Some(wildcard);
                        node.extension = extension;
                        children.wildcard_leaves.insert(node.extension.clone(), node);
                        continue;
                    }
                    if recurse {
                        let mut inner = bindings.clone();
                        inner.insert(wildcard.name.clone(), dir.to_path_buf());
                        node.children = self.scan(&node.path, &inner, true)?;
                    }
                    node.wildcard = Some(wildcard);
                    match children.wildcard_dir.take() {
                        None => children.wildcard_dir = Some(Box::new(node)),
                        Some(existing) => {
                            let keep_existing = self.keep_existing(slug, &existing, &node)?;
                            let winner = if keep_existing { *existing } else { node };
                            children.wildcard_dir = Some(Box::new(winner));
                        }
                    }
                    continue;
                }
            }

            if kind == NodeKind::Directory && recurse {
                node.children = self.scan(&node.path, bindings, true)?;
            }
            let bucket = if kind == NodeKind::Directory {
                &mut children.dirs
            } else {
                &mut children.files
            };
            if let Some(existing) = bucket.get(slug) {
                if self.keep_existing(slug, existing, &node)? {
                    continue;
                }
            }
            bucket.insert(slug.to_string(), node);
            if index.as_deref() == Some(joined.as_path()) {
                children.index = Some(slug.to_string());
            }
        }

        Ok(children)
    }

    /// Ask the collision policy whether `existing` keeps its slug.
    fn keep_existing(&self, slug: &str, existing: &Node, candidate: &Node) -> Result<bool, BuildError> {
        let action = self.options.collisions.resolve(slug, existing, candidate);
        tracing::debug!(
            slug,
            existing = %existing.path.display(),
            candidate = %candidate.path.display(),
            ?action,
            "Slug collision"
        );
        match action {
            CollisionAction::IgnoreSecond => Ok(true),
            CollisionAction::ReplaceFirst => Ok(false),
            CollisionAction::Raise => Err(BuildError::SlugCollision {
                slug: slug.to_string(),
                existing: existing.path.clone(),
                candidate: candidate.path.clone(),
            }),
        }
    }
}

/// Entry names of `dir`, sorted. Names that are not valid UTF-8 cannot be
/// addressed by a request path and are left out.
fn list_dir(dir: &Path) -> Result<Vec<String>, BuildError> {
    let io_error = |source| BuildError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => {
                tracing::debug!(dir = %dir.display(), ?name, "Skipping entry with a non UTF-8 name");
            }
        }
    }
    names.sort();
    Ok(names)
}

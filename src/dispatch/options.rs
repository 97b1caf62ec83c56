//! Construction inputs shared by both dispatcher variants.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::dispatch::collision::{CollisionHandler, CollisionPolicy};
use crate::dispatch::error::BuildError;
use crate::dispatch::filters::{
    DynamicExtensions, EntrySkipper, IsDynamic, SkipHidden, TypecasterRegistry,
};

/// Everything needed to build a dispatcher over a www root.
///
/// Cheap to clone; the capabilities are shared. A rebuild reuses the same
/// options.
#[derive(Clone)]
pub struct DispatcherOptions {
    pub(crate) www_root: PathBuf,
    pub(crate) is_dynamic: Arc<dyn IsDynamic>,
    pub(crate) indices: Vec<String>,
    pub(crate) typecasters: Arc<dyn TypecasterRegistry>,
    pub(crate) skipper: Arc<dyn EntrySkipper>,
    pub(crate) collisions: Arc<dyn CollisionHandler>,
}

impl DispatcherOptions {
    /// Options with `.spt` files dynamic, no indices, no typecasters, hidden
    /// entries skipped and permissive collisions.
    pub fn new(www_root: impl Into<PathBuf>) -> Self {
        Self {
            www_root: www_root.into(),
            is_dynamic: Arc::new(DynamicExtensions::new(["spt"])),
            indices: Vec::new(),
            typecasters: Arc::new(Vec::<String>::new()),
            skipper: Arc::new(SkipHidden),
            collisions: Arc::new(CollisionPolicy::Permissive),
        }
    }

    pub fn is_dynamic(mut self, is_dynamic: impl IsDynamic + 'static) -> Self {
        self.is_dynamic = Arc::new(is_dynamic);
        self
    }

    pub fn indices<I, S>(mut self, indices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indices = indices.into_iter().map(Into::into).collect();
        self
    }

    pub fn typecasters(mut self, typecasters: impl TypecasterRegistry + 'static) -> Self {
        self.typecasters = Arc::new(typecasters);
        self
    }

    pub fn skipper(mut self, skipper: impl EntrySkipper + 'static) -> Self {
        self.skipper = Arc::new(skipper);
        self
    }

    pub fn collisions(mut self, collisions: impl CollisionHandler + 'static) -> Self {
        self.collisions = Arc::new(collisions);
        self
    }

    pub fn www_root(&self) -> &Path {
        &self.www_root
    }

    pub fn index_names(&self) -> &[String] {
        &self.indices
    }

    /// The www root with symlinks resolved.
    pub(crate) fn canonical_root(&self) -> Result<PathBuf, BuildError> {
        let root = self
            .www_root
            .canonicalize()
            .map_err(|source| BuildError::Root {
                path: self.www_root.clone(),
                source,
            })?;
        if !root.is_dir() {
            return Err(BuildError::Root {
                path: self.www_root.clone(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
            });
        }
        Ok(root)
    }
}

impl std::fmt::Debug for DispatcherOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatcherOptions")
            .field("www_root", &self.www_root)
            .field("indices", &self.indices)
            .field("collisions", &self.collisions)
            .finish_non_exhaustive()
    }
}

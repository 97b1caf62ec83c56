//! Capabilities injected into tree construction.
//!
//! Each capability is a trait with a built-in implementation driven by
//! configuration, plus blanket impls so plain closures can be passed by
//! library callers.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

/// Decides whether a file is rendered at request time.
pub trait IsDynamic: Send + Sync {
    fn is_dynamic(&self, name: &str) -> bool;
}

impl<F> IsDynamic for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_dynamic(&self, name: &str) -> bool {
        self(name)
    }
}

/// Files whose last extension is one of a fixed set are dynamic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicExtensions(BTreeSet<String>);

impl DynamicExtensions {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(extensions.into_iter().map(Into::into).collect())
    }
}

impl IsDynamic for DynamicExtensions {
    fn is_dynamic(&self, name: &str) -> bool {
        name.rsplit_once('.')
            .is_some_and(|(_, ext)| self.0.contains(ext))
    }
}

/// Decides which directory entries never enter the routing tree.
pub trait EntrySkipper: Send + Sync {
    fn skip(&self, name: &str, dir: &Path) -> bool;
}

impl<F> EntrySkipper for F
where
    F: Fn(&str, &Path) -> bool + Send + Sync,
{
    fn skip(&self, name: &str, dir: &Path) -> bool {
        self(name, dir)
    }
}

/// Skip names starting with a dot, except `.well-known`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipHidden;

impl EntrySkipper for SkipHidden {
    fn skip(&self, name: &str, _dir: &Path) -> bool {
        is_hidden(name)
    }
}

/// Never skip anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipNothing;

impl EntrySkipper for SkipNothing {
    fn skip(&self, _name: &str, _dir: &Path) -> bool {
        false
    }
}

pub(crate) fn is_hidden(name: &str) -> bool {
    name.starts_with('.') && name != ".well-known"
}

/// Names of the known typecasters.
///
/// Only membership matters here: it disambiguates `%name.X` entries.
pub trait TypecasterRegistry: Send + Sync {
    fn is_typecaster(&self, name: &str) -> bool;
}

impl TypecasterRegistry for BTreeSet<String> {
    fn is_typecaster(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl TypecasterRegistry for HashSet<String> {
    fn is_typecaster(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl<V: Send + Sync> TypecasterRegistry for HashMap<String, V> {
    fn is_typecaster(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

impl TypecasterRegistry for Vec<String> {
    fn is_typecaster(&self, name: &str) -> bool {
        self.iter().any(|known| known == name)
    }
}

//! Dispatch outcome types.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Overall outcome of a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchStatus {
    /// A leaf resource answers the request.
    Okay,
    /// Nothing on disk answers the request.
    Missing,
    /// A directory matched but it has no index resource.
    Unindexed,
}

impl DispatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchStatus::Okay => "okay",
            DispatchStatus::Missing => "missing",
            DispatchStatus::Unindexed => "unindexed",
        }
    }
}

impl std::fmt::Display for DispatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of matching one request path against the routing namespace.
///
/// `wildcards` holds the raw captured strings; converting them into typed
/// values is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchResult {
    pub status: DispatchStatus,
    /// Matched resource, or the directory path with a trailing separator
    /// when unindexed. `None` when missing.
    #[serde(rename = "match")]
    pub matched: Option<PathBuf>,
    pub wildcards: BTreeMap<String, String>,
    /// Sub-extension negotiated by an indirect match (`json` for `/foo.json`
    /// answered by `foo.spt`).
    pub extension: Option<String>,
    /// Preferred path for this resource; callers should redirect to it.
    pub canonical: Option<String>,
}

impl DispatchResult {
    /// A clean `missing` result.
    pub fn missing() -> Self {
        Self {
            status: DispatchStatus::Missing,
            matched: None,
            wildcards: BTreeMap::new(),
            extension: None,
            canonical: None,
        }
    }

    pub fn okay(
        matched: &Path,
        wildcards: BTreeMap<String, String>,
        extension: Option<String>,
        canonical: Option<String>,
    ) -> Self {
        Self {
            status: DispatchStatus::Okay,
            matched: Some(matched.to_path_buf()),
            wildcards,
            extension,
            canonical,
        }
    }

    /// An `unindexed` result for `dir`; the match gets a trailing separator.
    pub fn unindexed(
        dir: &Path,
        wildcards: BTreeMap<String, String>,
        extension: Option<String>,
        canonical: Option<String>,
    ) -> Self {
        let mut matched = dir.as_os_str().to_os_string();
        matched.push(std::path::MAIN_SEPARATOR_STR);
        Self {
            status: DispatchStatus::Unindexed,
            matched: Some(PathBuf::from(matched)),
            wildcards,
            extension,
            canonical,
        }
    }

    pub fn is_okay(&self) -> bool {
        self.status == DispatchStatus::Okay
    }

    pub fn is_missing(&self) -> bool {
        self.status == DispatchStatus::Missing
    }

    /// Replace the result with `missing` when its match lies outside `root`.
    pub(crate) fn confined_to(self, root: &Path) -> Self {
        match &self.matched {
            Some(matched) if !matched.starts_with(root) => {
                tracing::warn!(
                    matched = %matched.display(),
                    root = %root.display(),
                    "Dispatch escaped the www root"
                );
                Self::missing()
            }
            _ => self,
        }
    }
}

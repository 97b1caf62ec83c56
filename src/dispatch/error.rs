//! Build-time errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort routing tree construction.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The same wildcard name is bound to two directories in one branch.
    #[error(
        "wildcard `{name}` is bound to both {} and {}",
        .first.display(),
        .second.display()
    )]
    WildcardCollision {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Two sibling entries claim the same slug and the policy raised.
    #[error(
        "slug `{slug}` is claimed by both {} and {}",
        .existing.display(),
        .candidate.display()
    )]
    SlugCollision {
        slug: String,
        existing: PathBuf,
        candidate: PathBuf,
    },

    /// The www root cannot be resolved.
    #[error("www root {} is not usable: {source}", .path.display())]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory could not be listed.
    #[error("failed to read directory {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

//! Directory index resolution.

use std::path::{Path, PathBuf};

/// Return the first of `candidates` that exists as a file in `dir`.
///
/// Candidates are tried in the order given, so the first configured index
/// name wins.
pub fn find_index<S: AsRef<str>>(dir: &Path, candidates: &[S]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|name| dir.join(name.as_ref()))
        .find(|path| path.is_file())
}

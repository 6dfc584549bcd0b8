// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The file enumerator: expands a user-supplied glob pattern into an
//! ordered list of member file paths.
//!
//! This is an external collaborator per the format's design: the glob
//! syntax itself is out of scope here. [`GlobEnumerator`] is the default,
//! narrow implementation backed by the `glob` crate; callers needing a
//! different resolution strategy (a fixed file list, a virtual filesystem)
//! can implement [`FileEnumerator`] themselves.

use std::path::PathBuf;

/// Resolves a pattern string into zero or more filesystem paths, in a
/// deterministic order.
///
/// Non-existence of an individual resolved path is a per-file error
/// surfaced later by the archive, not a fatal condition here.
pub trait FileEnumerator {
    fn enumerate(&self, pattern: &str) -> Vec<PathBuf>;
}

/// The default enumerator: resolves `pattern` via [`glob::glob`].
///
/// Entries that error during iteration (e.g. a permission-denied directory
/// encountered while expanding the pattern) are dropped rather than
/// aborting the whole expansion.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlobEnumerator;

impl FileEnumerator for GlobEnumerator {
    fn enumerate(&self, pattern: &str) -> Vec<PathBuf> {
        match glob::glob(pattern) {
            Ok(paths) => paths.filter_map(Result::ok).collect(),
            Err(e) => {
                log::warn!("invalid glob pattern {pattern:?}: {e}");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn glob_enumerator_finds_matching_files() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("a.binout")).unwrap();
        File::create(dir.path().join("b.binout")).unwrap();
        File::create(dir.path().join("c.txt")).unwrap();

        let pattern = dir.path().join("*.binout");
        let found = GlobEnumerator.enumerate(pattern.to_str().unwrap());

        assert_eq!(found.len(), 2);
    }

    #[test]
    fn glob_enumerator_empty_on_no_match() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = dir.path().join("*.nonexistent");
        let found = GlobEnumerator.enumerate(pattern.to_str().unwrap());
        assert!(found.is_empty());
    }
}

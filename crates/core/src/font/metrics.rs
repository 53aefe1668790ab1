//! Font name to metrics file resolution.

use crate::error::{DviError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolves a font name (as decoded from a font-definition command) to a
/// metrics resource on disk.
///
/// The interpreter calls this once per font definition and treats failure
/// as a warning; only character-dimension computations need the result.
pub trait FontMetricsProvider {
    /// Resolve `name` to the path of its metrics file.
    fn resolve(&self, name: &str) -> Result<PathBuf>;
}

/// Searches one or more directory trees for `<name>.tfm`.
///
/// Stands in for a full kpathsea-style lookup: a recursive walk over the
/// configured roots, first match wins.
#[derive(Debug, Default)]
pub struct FilesystemResolver {
    roots: Vec<PathBuf>,
}

impl FilesystemResolver {
    /// Create a resolver over the given search roots.
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Walk `dir` depth-first looking for `file_name`. Unreadable
    /// directories are skipped rather than aborting the search.
    fn find_in(dir: &Path, file_name: &str) -> Option<PathBuf> {
        let entries = fs::read_dir(dir).ok()?;
        let mut subdirs = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                subdirs.push(path);
            } else if path.file_name().is_some_and(|n| n == file_name) {
                return Some(path);
            }
        }
        subdirs
            .iter()
            .find_map(|sub| Self::find_in(sub, file_name))
    }
}

impl FontMetricsProvider for FilesystemResolver {
    fn resolve(&self, name: &str) -> Result<PathBuf> {
        let file_name = format!("{name}.tfm");
        self.roots
            .iter()
            .find_map(|root| Self::find_in(root, &file_name))
            .ok_or_else(|| DviError::MetricsNotFound(name.to_string()))
    }
}

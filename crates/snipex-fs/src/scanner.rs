//! Input discovery by filesystem walking.
//!
//! The Scanner only lists files; reading them (and coping with files that
//! vanish or fail to decode between listing and reading) is the caller's
//! concern. Directives can hide in any file, so nothing is filtered by
//! extension.

use std::fs;
use std::path::{Path, PathBuf};

/// Discovers input files by walking the source tree.
///
/// Results are sorted by path so repeated runs over an unchanged tree
/// process files in the same order and produce identical output.
pub struct Scanner {
    source_dir: PathBuf,
}

impl Scanner {
    /// Create a new Scanner rooted at `source_dir`.
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Walk the source tree and return every regular file, sorted.
    ///
    /// Returns an empty Vec if the source directory doesn't exist.
    #[must_use]
    pub fn scan(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        if self.source_dir.exists() {
            scan_directory(&self.source_dir, &mut files);
        }
        files.sort();
        files
    }
}

/// Collect regular files under `dir_path`, recursing into subdirectories.
fn scan_directory(dir_path: &Path, files: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir_path) else {
        tracing::warn!(dir = %dir_path.display(), "skipping unreadable directory");
        return;
    };

    for entry in entries.filter_map(Result::ok) {
        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            scan_directory(&path, files);
        } else {
            tracing::debug!(file = %path.display(), "adding input file");
            files.push(path);
        }
    }
}

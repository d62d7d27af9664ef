//! Scratch directories for xref-config unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A temporary directory tree that tests populate with tables and config files.
pub struct Scratch(TempDir);

impl Scratch {
    /// Creates an empty scratch tree.
    pub fn new() -> Self {
        Self(tempfile::tempdir().unwrap())
    }

    /// The root of the tree.
    pub fn path(&self) -> &Path {
        self.0.path()
    }

    /// Creates `rel` and its parents, returning the absolute path.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.path().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes a file at `rel`, creating parent directories.
    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Writes a `.xref.toml` inside directory `rel`.
    pub fn config(&self, rel: &str, content: &str) -> PathBuf {
        self.file(&Path::new(rel).join(CONFIG_FILENAME).to_string_lossy(), content)
    }
}

//! Registry of directories under watch

use dashmap::DashSet;
use std::path::{Path, PathBuf};
use telesync_core::error::{Error, Result};
use tracing::debug;

/// Concurrent set of watched directory roots
///
/// Registration validates that the path exists and is a directory, then
/// stores the canonical form as the unique key. Registering the same
/// directory again is a no-op success. There is no unwatch operation;
/// entries live for the lifetime of the process.
#[derive(Debug, Default)]
pub struct WatchRegistry {
    dirs: DashSet<PathBuf>,
}

impl WatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a directory for watching, returning its canonical path
    pub fn register(&self, path: &Path) -> Result<PathBuf> {
        let canonical = path
            .canonicalize()
            .map_err(|e| Error::watch(format!("cannot watch {}: {e}", path.display())))?;
        if !canonical.is_dir() {
            return Err(Error::watch(format!(
                "cannot watch {}: not a directory",
                path.display()
            )));
        }

        if self.dirs.insert(canonical.clone()) {
            debug!("registered watch directory {}", canonical.display());
        }
        Ok(canonical)
    }

    /// Whether a canonical path has been registered
    pub fn contains(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    /// Snapshot of the registered directories
    pub fn paths(&self) -> Vec<PathBuf> {
        self.dirs.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_register_is_idempotent() {
        let dir = TempDir::new().expect("tempdir failed");
        let registry = WatchRegistry::new();

        let first = registry.register(dir.path()).expect("register failed");
        let second = registry.register(dir.path()).expect("register failed");

        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&first));
    }

    #[test]
    fn test_register_missing_path_fails() {
        let dir = TempDir::new().expect("tempdir failed");
        let registry = WatchRegistry::new();

        assert!(registry.register(&dir.path().join("gone")).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_file_fails() {
        let dir = TempDir::new().expect("tempdir failed");
        let file = dir.path().join("a.txt");
        fs::write(&file, "a").expect("write failed");
        let registry = WatchRegistry::new();

        assert!(registry.register(&file).is_err());
        assert!(registry.is_empty());
    }
}

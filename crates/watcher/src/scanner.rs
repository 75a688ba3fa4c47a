//! Recursive listing of regular files under a watched root

use std::path::{Path, PathBuf};
use telesync_core::error::{Error, Result};
use tracing::trace;
use walkdir::WalkDir;

/// List every regular file under `root`, recursively
///
/// Directories are descended into but excluded from the result. Entries that
/// cannot be read (permission denied, deleted mid-walk) are skipped and the
/// walk continues; only an error on the root itself is returned to the
/// caller. The yielded order is whatever the directory iteration produces
/// and is not guaranteed stable across calls.
pub fn scan(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() {
                    files.push(entry.into_path());
                }
            }
            Err(e) => {
                if e.depth() == 0 {
                    return Err(Error::watch(format!(
                        "cannot scan {}: {e}",
                        root.display()
                    )));
                }
                trace!("skipping unreadable entry under {}: {e}", root.display());
            }
        }
    }

    Ok(files)
}

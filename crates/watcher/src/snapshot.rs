//! Size+mtime snapshots for incremental change detection

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;
use tracing::trace;

/// Last-observed state of a single file
///
/// Records are created on first observation and updated on every detected
/// change; they are never removed, so a file that disappears keeps its last
/// snapshot for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// File size in bytes
    pub size: u64,
    /// Last-known modification time
    pub modified: SystemTime,
    /// Wall-clock time the record was last updated
    pub last_synced: SystemTime,
}

/// In-memory mapping from absolute path to [`FileRecord`]
///
/// One store is shared by every poller; all access goes through a single
/// mutex held for the duration of one diff pass. The store performs no I/O
/// other than stat calls and never touches the network, so the coarse lock
/// is bounded by the poll interval rather than request rate.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    records: Mutex<HashMap<PathBuf, FileRecord>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare candidate paths against the snapshot, returning the subset
    /// that is new or changed and updating the records in the same pass
    ///
    /// A path counts as changed when its modification time is strictly newer
    /// than the recorded one or its size differs. Paths that cannot be
    /// stat-ed are skipped silently: a file vanishing between listing and
    /// stat is expected under concurrent filesystem mutation.
    pub fn diff(&self, candidates: &[PathBuf]) -> Vec<PathBuf> {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        let mut changed = Vec::new();

        for path in candidates {
            let metadata = match std::fs::metadata(path) {
                Ok(metadata) => metadata,
                Err(e) => {
                    trace!("skipping {}: {e}", path.display());
                    continue;
                }
            };
            let modified = match metadata.modified() {
                Ok(modified) => modified,
                Err(e) => {
                    trace!("skipping {}: {e}", path.display());
                    continue;
                }
            };

            match records.get_mut(path) {
                None => {
                    records.insert(
                        path.clone(),
                        FileRecord {
                            size: metadata.len(),
                            modified,
                            last_synced: SystemTime::now(),
                        },
                    );
                    changed.push(path.clone());
                }
                Some(record) if modified > record.modified || metadata.len() != record.size => {
                    record.size = metadata.len();
                    record.modified = modified;
                    record.last_synced = SystemTime::now();
                    changed.push(path.clone());
                }
                Some(_) => {}
            }
        }

        changed
    }

    /// Last-observed state for a path, if it has ever been seen
    pub fn record(&self, path: &Path) -> Option<FileRecord> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(path)
            .cloned()
    }

    /// Number of files ever observed
    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! Per-directory poll loops and dispatch

use crate::router::FileCategory;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use telesync_core::config::DEFAULT_SYNC_INTERVAL_SECS;
use telesync_core::error::{Error, Result};
use telesync_telegram::{Message, Uploader};
use telesync_watcher::{scan, FilterPolicy, SnapshotStore, WatchRegistry};
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Destination identity plus the delivery capability
///
/// Constructed once and shared read-only by every poller.
#[derive(Clone)]
pub struct SyncTarget {
    pub chat_id: String,
    pub uploader: Arc<dyn Uploader>,
}

impl SyncTarget {
    pub fn new(chat_id: impl Into<String>, uploader: Arc<dyn Uploader>) -> Self {
        Self {
            chat_id: chat_id.into(),
            uploader,
        }
    }
}

/// State shared between the service handle and its spawned pollers
struct Inner {
    target: SyncTarget,
    filter: FilterPolicy,
    registry: WatchRegistry,
    snapshots: SnapshotStore,
    cancel: CancellationToken,
}

/// Relay engine running one poll loop per watched directory
///
/// All pollers share the snapshot store and registry; locks are taken only
/// for map access and are never held across an upload. A single
/// cancellation token broadcasts shutdown, and [`SyncService::stop`] joins
/// every poller before returning.
pub struct SyncService {
    inner: Arc<Inner>,
    pollers: tokio::sync::Mutex<JoinSet<()>>,
}

impl SyncService {
    pub fn new(target: SyncTarget, filter: FilterPolicy) -> Self {
        Self {
            inner: Arc::new(Inner {
                target,
                filter,
                registry: WatchRegistry::new(),
                snapshots: SnapshotStore::new(),
                cancel: CancellationToken::new(),
            }),
            pollers: tokio::sync::Mutex::new(JoinSet::new()),
        }
    }

    /// Register a directory for watching without starting a poller
    pub fn register_directory(&self, path: &Path) -> Result<PathBuf> {
        self.inner.registry.register(path)
    }

    /// Upload a single file, classified by extension
    pub async fn sync_file(&self, path: &Path) -> Result<Message> {
        dispatch(&self.inner, path).await
    }

    /// Run one synchronous scan-filter-diff-dispatch pass over a directory
    pub async fn sync_once(&self, dir: &Path) -> Result<()> {
        let dir = self.inner.registry.register(dir)?;
        run_cycle(&self.inner, &dir).await?;
        Ok(())
    }

    /// Start a poller that re-syncs `dir` on a fixed interval
    ///
    /// The first cycle runs immediately; an interval of zero is replaced by
    /// the configured default. Fails if `dir` is not a valid directory.
    pub async fn start_continuous_sync(&self, dir: &Path, interval: Duration) -> Result<()> {
        let dir = self.inner.registry.register(dir)?;
        let interval = if interval.is_zero() {
            Duration::from_secs(DEFAULT_SYNC_INTERVAL_SECS)
        } else {
            interval
        };

        let inner = Arc::clone(&self.inner);
        let mut pollers = self.pollers.lock().await;
        pollers.spawn(poll_loop(inner, dir, interval));
        Ok(())
    }

    /// Signal shutdown and wait for every poller to exit
    pub async fn stop(&self) {
        self.inner.cancel.cancel();
        let mut pollers = self.pollers.lock().await;
        while pollers.join_next().await.is_some() {}
        info!("all pollers drained");
    }
}

/// One poller: fixed-period cycles until the shutdown token fires
async fn poll_loop(inner: Arc<Inner>, dir: PathBuf, interval: Duration) {
    info!("watching {} (interval {:?})", dir.display(), interval);

    let mut ticker = tokio::time::interval(interval);
    // A cycle slower than the interval must not produce a burst of
    // catch-up ticks afterwards.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        // The first tick completes immediately, so files already present at
        // startup are relayed without waiting a full interval.
        tokio::select! {
            _ = inner.cancel.cancelled() => {
                info!("stopping watch of {}", dir.display());
                return;
            }
            _ = ticker.tick() => {
                match run_cycle(&inner, &dir).await {
                    Ok(sent) if sent > 0 => {
                        debug!("relayed {sent} file(s) from {}", dir.display());
                    }
                    Ok(_) => {}
                    Err(e) => error!("sync cycle for {} failed: {e}", dir.display()),
                }
            }
        }
    }
}

/// One scan-filter-diff-dispatch pass; returns the number of files delivered
///
/// The snapshot lock is released before the first upload starts, so a slow
/// network call never blocks the other pollers' diffs. Per-file dispatch
/// failures are logged and the batch continues.
async fn run_cycle(inner: &Inner, dir: &Path) -> Result<usize> {
    if inner.cancel.is_cancelled() {
        return Ok(0);
    }

    let listed = scan(dir)?;
    let eligible: Vec<PathBuf> = listed
        .into_iter()
        .filter(|path| inner.filter.is_eligible(path))
        .collect();
    let changed = inner.snapshots.diff(&eligible);

    let mut sent = 0;
    for path in changed {
        if inner.cancel.is_cancelled() {
            break;
        }
        match dispatch(inner, &path).await {
            Ok(receipt) => {
                debug!("sent {} (message {})", path.display(), receipt.message_id);
                sent += 1;
            }
            Err(e) => error!("{e}"),
        }
    }
    Ok(sent)
}

/// Classify a file and hand it to the matching uploader method
async fn dispatch(inner: &Inner, path: &Path) -> Result<Message> {
    if path.as_os_str().is_empty() {
        return Err(Error::invalid_input("file path cannot be empty"));
    }

    let caption = format!(
        "File: {}",
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    );
    let category = FileCategory::from_path(path);
    let chat_id = &inner.target.chat_id;
    let uploader = inner.target.uploader.as_ref();

    let result = match category {
        FileCategory::Audio => uploader.send_audio(chat_id, path, &caption).await,
        FileCategory::Photo => uploader.send_photo(chat_id, path, &caption).await,
        FileCategory::Video => uploader.send_video(chat_id, path, &caption).await,
        FileCategory::Document => uploader.send_document(chat_id, path, &caption).await,
    };

    result.map_err(|e| Error::dispatch(path.display().to_string(), category.as_str(), e))
}

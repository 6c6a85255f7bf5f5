//! Filesystem watcher implementation

use anyhow::Result;
use boundary_core::{CACHE_DIR, GraphDiff};
use boundary_indexer::{Engine, ModuleAnalyzer, TypeScriptAnalyzer, is_source_file};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};

/// Quiet period that closes a batch of file events.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Events emitted by the file watcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// File or directory created
    Created(PathBuf),
    /// File or directory modified
    Modified(PathBuf),
    /// File or directory removed
    Removed(PathBuf),
}

impl WatchEvent {
    pub fn path(&self) -> &Path {
        match self {
            WatchEvent::Created(path) | WatchEvent::Modified(path) | WatchEvent::Removed(path) => path,
        }
    }

    pub fn into_path(self) -> PathBuf {
        match self {
            WatchEvent::Created(path) | WatchEvent::Modified(path) | WatchEvent::Removed(path) => path,
        }
    }
}

/// File system watcher for monitoring source changes
pub struct FileWatcher {
    watcher: RecommendedWatcher,
    event_rx: mpsc::UnboundedReceiver<WatchEvent>,
    watched_paths: HashSet<PathBuf>,
    root_path: PathBuf,
}

impl FileWatcher {
    /// Create a new file watcher for the given root path
    pub fn new(root_path: impl AsRef<Path>) -> Result<Self> {
        let root_path = root_path.as_ref().to_path_buf();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let root = root_path.clone();
        let watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
            match res {
                Ok(event) => {
                    debug!("File system event: {:?}", event);
                    Self::handle_notify_event(event, &root, &event_tx);
                }
                Err(e) => {
                    error!("File system watch error: {}", e);
                }
            }
        })?;

        Ok(Self {
            watcher,
            event_rx,
            watched_paths: HashSet::new(),
            root_path,
        })
    }

    /// Convert a notify event into watch events for relevant paths
    fn handle_notify_event(
        event: notify::Event,
        root: &Path,
        event_tx: &mpsc::UnboundedSender<WatchEvent>,
    ) {
        let make: fn(PathBuf) -> WatchEvent = match event.kind {
            notify::EventKind::Create(_) => WatchEvent::Created,
            notify::EventKind::Modify(_) => WatchEvent::Modified,
            notify::EventKind::Remove(_) => WatchEvent::Removed,
            _ => return,
        };
        let removal = matches!(event.kind, notify::EventKind::Remove(_));

        for path in event.paths {
            if should_ignore_path(root, &path) || !is_relevant(&path, removal) {
                continue;
            }
            if let Err(e) = event_tx.send(make(path)) {
                warn!("Failed to forward watch event: {}", e);
            }
        }
    }

    /// Watch a directory recursively
    pub fn watch_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        info!("Watching directory: {}", path.display());

        self.watcher.watch(path, RecursiveMode::Recursive)?;
        self.watched_paths.insert(path.to_path_buf());
        Ok(())
    }

    /// Stop watching a path
    pub fn unwatch(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        info!("Stopping watch for: {}", path.display());

        self.watcher.unwatch(path)?;
        self.watched_paths.remove(path);
        Ok(())
    }

    /// Get the event receiver
    pub fn event_receiver(&mut self) -> &mut mpsc::UnboundedReceiver<WatchEvent> {
        &mut self.event_rx
    }

    /// Check if a path is being watched
    pub fn is_watching(&self, path: &Path) -> bool {
        self.watched_paths.contains(path)
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }
}

/// Owns the engine and turns debounced file events into incremental builds.
///
/// Every completed build's diff is published on the broadcast channel; having
/// no receivers is fine.
pub struct WatcherService<A: ModuleAnalyzer = TypeScriptAnalyzer> {
    watcher: FileWatcher,
    engine: Engine<A>,
    diff_tx: broadcast::Sender<GraphDiff>,
    debounce: Duration,
    builds: Arc<AtomicU64>,
}

impl<A: ModuleAnalyzer> WatcherService<A> {
    /// Create a watcher service over the engine's project root
    pub fn new(mut engine: Engine<A>, diff_tx: broadcast::Sender<GraphDiff>) -> Result<Self> {
        let watcher = FileWatcher::new(engine.root())?;

        let builds = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&builds);
        engine.subscribe(move || {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        Ok(Self {
            watcher,
            engine,
            diff_tx,
            debounce: DEFAULT_DEBOUNCE,
            builds,
        })
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn engine(&self) -> &Engine<A> {
        &self.engine
    }

    /// Number of builds that completed successfully so far
    pub fn builds(&self) -> u64 {
        self.builds.load(Ordering::Relaxed)
    }

    /// Start watching the project directory
    pub fn start_watching(&mut self) -> Result<()> {
        let root_path = self.watcher.root_path().to_path_buf();
        self.watcher.watch_directory(&root_path)?;
        info!("Started watching project directory: {}", root_path.display());
        Ok(())
    }

    /// Watch, run the initial full build, then rebuild on every batch of
    /// changes until the event stream ends.
    pub async fn run(mut self) -> Result<()> {
        self.start_watching()?;
        self.rebuild(&[]);

        while let Some(batch) = self.next_batch().await {
            debug!("Processing batch of {} changed paths", batch.len());
            self.rebuild(&batch);
        }

        info!("Watch event stream closed");
        Ok(())
    }

    /// Wait for one event, then keep collecting until the channel has been
    /// quiet for the debounce window.
    async fn next_batch(&mut self) -> Option<Vec<PathBuf>> {
        let debounce = self.debounce;
        let event_rx = self.watcher.event_receiver();

        let mut batch = BTreeSet::new();
        batch.insert(event_rx.recv().await?.into_path());
        loop {
            match tokio::time::timeout(debounce, event_rx.recv()).await {
                Ok(Some(event)) => {
                    batch.insert(event.into_path());
                }
                Ok(None) | Err(_) => break,
            }
        }
        Some(batch.into_iter().collect())
    }

    /// Run one build and publish its diff. A failed build is logged and the
    /// next batch retries from the current state.
    pub fn rebuild(&mut self, changed: &[PathBuf]) {
        if let Err(e) = self.engine.build(changed) {
            error!("Build failed: {}", e);
            return;
        }
        if let Some(diff) = self.engine.last_diff() {
            // It's okay if there are no receivers
            let _ = self.diff_tx.send(diff.clone());
        }
    }
}

/// Source files always matter. Removals without an extension are usually
/// directories, whose files never get their own event.
fn is_relevant(path: &Path, removal: bool) -> bool {
    is_source_file(path) || (removal && path.extension().is_none())
}

/// Check if a path should be ignored (e.g., node_modules/, .git/, etc.).
/// Only components below the root count.
fn should_ignore_path(root: &Path, path: &Path) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.components().any(|component| {
        component
            .as_os_str()
            .to_str()
            .is_some_and(|name| name == ".git" || name == "node_modules" || name == CACHE_DIR)
    })
}

//! Snapshot cache for classification results

use crate::error::{CoreError, Result};
use crate::graph::NodeStore;
use crate::model::FileNode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Cache directory: .boundary/
pub const CACHE_DIR: &str = ".boundary";

/// Snapshot file inside the cache directory
pub const SNAPSHOT_FILE: &str = "snapshot.json";

/// Persisted node store, sorted by path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub version: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub root: PathBuf,
    pub nodes: Vec<FileNode>,
}

impl Snapshot {
    pub fn capture(store: &NodeStore, root: &Path) -> Self {
        Snapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: chrono::Utc::now(),
            root: root.to_path_buf(),
            nodes: store.snapshot(),
        }
    }
}

/// Get cache directory path
pub fn cache_dir(root: &Path) -> PathBuf {
    root.join(CACHE_DIR)
}

/// Get snapshot file path
pub fn snapshot_path(root: &Path) -> PathBuf {
    root.join(CACHE_DIR).join(SNAPSHOT_FILE)
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> CoreError + '_ {
    move |source| CoreError::CacheIo {
        path: path.to_path_buf(),
        source,
    }
}

/// Ensure cache directory exists
pub fn ensure_cache_dir(root: &Path) -> Result<()> {
    let cache = cache_dir(root);
    if !cache.exists() {
        std::fs::create_dir_all(&cache).map_err(io_error(&cache))?;
    }
    Ok(())
}

/// Write the current node store to the snapshot file.
pub fn save_snapshot(store: &NodeStore, root: &Path) -> Result<Snapshot> {
    ensure_cache_dir(root)?;
    let path = snapshot_path(root);

    let snapshot = Snapshot::capture(store, root);
    let json_str = serde_json::to_string_pretty(&snapshot).map_err(|source| {
        CoreError::Snapshot {
            path: path.clone(),
            source,
        }
    })?;
    std::fs::write(&path, json_str).map_err(io_error(&path))?;

    tracing::debug!("Snapshot saved: {}", path.display());
    Ok(snapshot)
}

/// Load the previous snapshot, if one was saved.
pub fn load_snapshot(root: &Path) -> Result<Option<Snapshot>> {
    let path = snapshot_path(root);
    if !path.exists() {
        return Ok(None);
    }

    let json_str = std::fs::read_to_string(&path).map_err(io_error(&path))?;
    let snapshot = serde_json::from_str(&json_str).map_err(|source| CoreError::Snapshot {
        path: path.clone(),
        source,
    })?;

    tracing::debug!("Snapshot loaded from: {}", path.display());
    Ok(Some(snapshot))
}

/// Clear cache directory
pub fn clear_cache(root: &Path) -> Result<()> {
    let cache = cache_dir(root);
    if cache.exists() {
        std::fs::remove_dir_all(&cache).map_err(io_error(&cache))?;
    }
    Ok(())
}

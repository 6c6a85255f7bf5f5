//! File system watching and debounced incremental rebuilds

pub mod watcher;

pub use watcher::{DEFAULT_DEBOUNCE, FileWatcher, WatchEvent, WatcherService};

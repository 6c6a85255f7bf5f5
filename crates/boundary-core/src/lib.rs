//! Boundary Core: file graph model, environment classifier, and diff engine

pub mod cache;
pub mod classify;
pub mod diff;
pub mod error;
pub mod graph;
pub mod model;
pub mod notify;
pub mod workspace;


pub use model::{EnvironmentType, FileNode, ModuleFacts};
pub use graph::NodeStore;
pub use classify::classify;
pub use diff::{DiffEngine, GraphDiff, Retyped, TypeSnapshot, diff_types, type_snapshot};
pub use error::CoreError;
pub use notify::{ListenerId, UpdateNotifier};
pub use workspace::{RESOLUTION_CONFIGS, detect_resolution_config};
pub use cache::{CACHE_DIR, SNAPSHOT_FILE, Snapshot, cache_dir, snapshot_path, ensure_cache_dir, save_snapshot, load_snapshot, clear_cache};

//! Graph diff computation for incremental updates

use crate::graph::NodeStore;
use crate::model::EnvironmentType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A node whose classification changed between two builds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Retyped {
    pub path: PathBuf,
    pub previous: Option<EnvironmentType>,
    pub current: Option<EnvironmentType>,
}

/// What one build changed in the node store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphDiff {
    /// Monotonically increasing build sequence number.
    pub sequence: u64,
    /// Nodes added in this update, sorted by path.
    pub added: Vec<PathBuf>,
    /// Nodes removed in this update, sorted by path.
    pub removed: Vec<PathBuf>,
    /// Surviving nodes whose type changed, sorted by path.
    pub retyped: Vec<Retyped>,
}

impl GraphDiff {
    /// Create an empty diff with given sequence number.
    pub fn new(sequence: u64) -> Self {
        GraphDiff {
            sequence,
            added: Vec::new(),
            removed: Vec::new(),
            retyped: Vec::new(),
        }
    }

    /// Check if this diff is empty (no changes).
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.retyped.is_empty()
    }
}

/// Type of every node at a point in time.
pub type TypeSnapshot = HashMap<PathBuf, Option<EnvironmentType>>;

/// Capture the current type of every node.
pub fn type_snapshot(store: &NodeStore) -> TypeSnapshot {
    store
        .iter()
        .map(|n| (n.file_path.clone(), n.env_type))
        .collect()
}

/// Diff state for incremental updates.
pub struct DiffEngine {
    sequence: u64,
}

impl DiffEngine {
    pub fn new() -> Self {
        DiffEngine { sequence: 0 }
    }

    /// Compare the types captured before a build with the store after it.
    /// Returns a GraphDiff with the sequence number incremented.
    pub fn compute_diff(&mut self, before: &TypeSnapshot, after: &NodeStore) -> GraphDiff {
        self.sequence += 1;
        let mut diff = diff_types(before, &type_snapshot(after));
        diff.sequence = self.sequence;
        diff
    }

    /// Get current sequence number.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Diff two type snapshots. The result carries sequence 0.
pub fn diff_types(before: &TypeSnapshot, after: &TypeSnapshot) -> GraphDiff {
    let mut diff = GraphDiff::new(0);

    for (path, current) in after {
        match before.get(path) {
            None => diff.added.push(path.clone()),
            Some(previous) if previous != current => diff.retyped.push(Retyped {
                path: path.clone(),
                previous: *previous,
                current: *current,
            }),
            Some(_) => {}
        }
    }

    for path in before.keys() {
        if !after.contains_key(path) {
            diff.removed.push(path.clone());
        }
    }

    diff.added.sort();
    diff.removed.sort();
    diff.retyped.sort_by(|a, b| a.path.cmp(&b.path));
    diff
}

//! Node store keyed by absolute file path

use crate::model::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The dependency graph: one `FileNode` per tracked file.
///
/// Edges live inside each node's `imports` list and may point at paths that
/// are not nodes. Those edges are inert and ignored by the classifier.
#[derive(Clone, Default, PartialEq)]
pub struct NodeStore {
    nodes: HashMap<PathBuf, FileNode>,
}

impl std::fmt::Debug for NodeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeStore")
            .field("node_count", &self.nodes.len())
            .finish()
    }
}

impl NodeStore {
    pub fn new() -> Self {
        NodeStore {
            nodes: HashMap::new(),
        }
    }

    /// Create or overwrite the node for `path` from fresh analyzer facts.
    ///
    /// An existing node keeps its previous type until the next
    /// classification pass runs.
    pub fn upsert(&mut self, path: &Path, facts: ModuleFacts) {
        match self.nodes.get_mut(path) {
            Some(node) => node.update(facts),
            None => {
                self.nodes
                    .insert(path.to_path_buf(), FileNode::new(path, facts));
            }
        }
    }

    /// Remove a node. Returns the node if it was present.
    pub fn remove(&mut self, path: &Path) -> Option<FileNode> {
        self.nodes.remove(path)
    }

    /// Write classifier output back onto the nodes.
    ///
    /// Entries for paths that are no longer nodes are ignored.
    pub fn apply_types(&mut self, types: &HashMap<PathBuf, EnvironmentType>) {
        for (path, env_type) in types {
            if let Some(node) = self.nodes.get_mut(path) {
                node.env_type = Some(*env_type);
            }
        }
    }

    pub fn get(&self, path: &Path) -> Option<&FileNode> {
        self.nodes.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.nodes.contains_key(path)
    }

    pub fn type_of(&self, path: &Path) -> Option<EnvironmentType> {
        self.nodes.get(path).and_then(|n| n.env_type)
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &FileNode> {
        self.nodes.values()
    }

    /// Iterate over all node paths in no particular order.
    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.nodes.keys()
    }

    /// Sorted copy of every node, for comparison and serialization.
    pub fn snapshot(&self) -> Vec<FileNode> {
        let mut nodes: Vec<FileNode> = self.nodes.values().cloned().collect();
        nodes.sort_by(|a, b| a.file_path.cmp(&b.file_path));
        nodes
    }
}

//! Environment classification over the import graph
//!
//! Classification runs in three steps over a read-only [`NodeStore`]:
//!
//! 1. Files carrying the client directive seed a reachability walk along
//!    import edges. Edges into paths that are not nodes are skipped.
//! 2. Every reached file is provisionally `client`, everything else `server`.
//! 3. A file without the directive whose importers include at least one
//!    provisional `client` and one provisional `server` becomes `universal`.
//!
//! Promotion looks only at the provisional types from step 2, so it is a
//! single pass and never chains through other promoted files.

use crate::graph::NodeStore;
use crate::model::{EnvironmentType, FileNode};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Compute a fresh `path -> type` mapping covering every node in `store`.
pub fn classify(store: &NodeStore) -> HashMap<PathBuf, EnvironmentType> {
    let view = ImportView::build(store);
    let baseline = view.baseline_types();

    let mut types = HashMap::with_capacity(view.graph.node_count());
    for idx in view.graph.node_indices() {
        let node = view.graph[idx];
        let env_type = if !node.is_client && view.has_mixed_importers(idx, &baseline) {
            EnvironmentType::Universal
        } else {
            baseline[idx.index()]
        };
        types.insert(node.file_path.clone(), env_type);
    }

    tracing::debug!(
        "Classified {} files ({} client entries)",
        types.len(),
        view.entries.len()
    );
    types
}

/// Petgraph view of the node store restricted to edges between nodes.
struct ImportView<'a> {
    graph: DiGraph<&'a FileNode, ()>,
    entries: Vec<NodeIndex>,
}

impl<'a> ImportView<'a> {
    fn build(store: &'a NodeStore) -> Self {
        let mut nodes: Vec<&FileNode> = store.iter().collect();
        nodes.sort_by(|a, b| a.file_path.cmp(&b.file_path));

        let mut graph = DiGraph::with_capacity(nodes.len(), 0);
        let mut index: HashMap<&Path, NodeIndex> = HashMap::with_capacity(nodes.len());
        let mut entries = Vec::new();

        for node in &nodes {
            let idx = graph.add_node(*node);
            index.insert(node.file_path.as_path(), idx);
            if node.is_client {
                entries.push(idx);
            }
        }

        for node in &nodes {
            let source = index[node.file_path.as_path()];
            for target in &node.imports {
                // Dangling edges stay out of the view.
                if let Some(&target) = index.get(target.as_path()) {
                    graph.add_edge(source, target, ());
                }
            }
        }

        ImportView { graph, entries }
    }

    /// Client for everything reachable from a directive file, server otherwise.
    fn baseline_types(&self) -> Vec<EnvironmentType> {
        let mut types = vec![EnvironmentType::Server; self.graph.node_count()];
        let mut dfs = Dfs::empty(&self.graph);
        for &entry in &self.entries {
            // The discovered set is shared, so cycles and overlapping
            // closures are each walked once.
            dfs.move_to(entry);
            while let Some(idx) = dfs.next(&self.graph) {
                types[idx.index()] = EnvironmentType::Client;
            }
        }
        types
    }

    fn has_mixed_importers(&self, target: NodeIndex, baseline: &[EnvironmentType]) -> bool {
        let mut has_client = false;
        let mut has_server = false;
        for importer in self.graph.neighbors_directed(target, Direction::Incoming) {
            match baseline[importer.index()] {
                EnvironmentType::Client => has_client = true,
                EnvironmentType::Server => has_server = true,
                EnvironmentType::Universal => {}
            }
            if has_client && has_server {
                return true;
            }
        }
        false
    }
}

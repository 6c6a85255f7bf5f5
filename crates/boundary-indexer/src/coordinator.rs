//! Dependency graph engine: reconcile, analyze, classify, notify

use crate::config::EngineConfig;
use crate::error::{ConfigError, EngineError};
use crate::exclusion::ExclusionSet;
use crate::extractor::ModuleAnalyzer;
use crate::languages::TypeScriptAnalyzer;
use crate::reconcile::Reconciler;
use crate::resolver::ModuleResolver;
use crate::sources::SourceSet;
use boundary_core::{
    DiffEngine, GraphDiff, ListenerId, NodeStore, UpdateNotifier, classify,
    detect_resolution_config, type_snapshot,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Owns one project's graph and keeps it in line with the file system.
///
/// `build` calls must be serialized by the caller. The node store is only
/// reachable through [`Engine::graph`], which hands out a shared reference.
pub struct Engine<A: ModuleAnalyzer = TypeScriptAnalyzer> {
    root: PathBuf,
    exclusions: ExclusionSet,
    sources: SourceSet,
    analyzer: A,
    store: NodeStore,
    notifier: UpdateNotifier,
    diffs: DiffEngine,
    last_diff: Option<GraphDiff>,
}

impl<A: ModuleAnalyzer> std::fmt::Debug for Engine<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("root", &self.root)
            .field("sources", &self.sources.len())
            .field("nodes", &self.store.len())
            .field("sequence", &self.diffs.sequence())
            .finish()
    }
}

impl Engine<TypeScriptAnalyzer> {
    /// Build an engine with the tree-sitter analyzer and `oxc_resolver`.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let root = canonical_root(&config.root)?;
        let tsconfig = match &config.tsconfig {
            Some(path) => {
                let path = if path.is_relative() { root.join(path) } else { path.clone() };
                if !path.is_file() {
                    return Err(ConfigError::MissingResolutionConfig(path));
                }
                Some(path)
            }
            None => detect_resolution_config(&root),
        };
        match &tsconfig {
            Some(path) => tracing::info!("Module resolution config: {}", path.display()),
            None => tracing::info!("No tsconfig.json or jsconfig.json; resolving relative imports only"),
        }

        let analyzer = TypeScriptAnalyzer::new(ModuleResolver::new(tsconfig));
        Self::assemble(root, &config.exclude, analyzer)
    }
}

impl<A: ModuleAnalyzer> Engine<A> {
    /// Build an engine around a custom analyzer. `config.tsconfig` is
    /// ignored; resolution is the analyzer's business.
    pub fn with_analyzer(config: EngineConfig, analyzer: A) -> Result<Self, ConfigError> {
        let root = canonical_root(&config.root)?;
        Self::assemble(root, &config.exclude, analyzer)
    }

    fn assemble(root: PathBuf, exclude: &[String], analyzer: A) -> Result<Self, ConfigError> {
        let exclusions = ExclusionSet::new(&root, exclude)?;
        Ok(Engine {
            root,
            exclusions,
            sources: SourceSet::new(),
            analyzer,
            store: NodeStore::new(),
            notifier: UpdateNotifier::new(),
            diffs: DiffEngine::new(),
            last_diff: None,
        })
    }

    /// Bring the graph up to date.
    ///
    /// An empty `changed` slice runs a full scan of the project root.
    /// Otherwise only the listed paths are re-examined, plus a sweep for
    /// tracked files that vanished. Listeners fire once on success.
    pub fn build(&mut self, changed: &[PathBuf]) -> Result<(), EngineError> {
        let before = type_snapshot(&self.store);

        let reconciliation = Reconciler {
            root: &self.root,
            exclusions: &self.exclusions,
            sources: &mut self.sources,
            store: &mut self.store,
        }
        .reconcile(changed)?;

        self.apply_affected(&reconciliation.affected);

        let types = classify(&self.store);
        self.store.apply_types(&types);

        let diff = self.diffs.compute_diff(&before, &self.store);
        tracing::info!(
            "Build #{}: {} nodes ({} added, {} removed, {} retyped)",
            diff.sequence,
            self.store.len(),
            diff.added.len(),
            diff.removed.len(),
            diff.retyped.len()
        );
        self.last_diff = Some(diff);

        self.notifier.notify();
        Ok(())
    }

    /// Recompute the node of every affected path from its registered source.
    fn apply_affected(&mut self, affected: &BTreeSet<PathBuf>) {
        for path in affected {
            let Some(source) = self.sources.get(path) else {
                self.store.remove(path);
                continue;
            };
            match self.analyzer.analyze(path, &source.text) {
                Ok(facts) => self.store.upsert(path, facts),
                Err(e) => {
                    tracing::warn!("Leaving {} out of the graph: {}", path.display(), e);
                    self.store.remove(path);
                }
            }
        }
    }

    /// Read-only view of the graph as of the last successful build.
    pub fn graph(&self) -> &NodeStore {
        &self.store
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// What the most recent successful build changed.
    pub fn last_diff(&self) -> Option<&GraphDiff> {
        self.last_diff.as_ref()
    }

    /// Register a callback fired once after every successful build.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut() + Send + 'static,
    {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.notifier.unsubscribe(id)
    }
}

fn canonical_root(root: &Path) -> Result<PathBuf, ConfigError> {
    let canonical = std::fs::canonicalize(root).map_err(|source| ConfigError::RootUnavailable {
        path: root.to_path_buf(),
        source,
    })?;
    if !canonical.is_dir() {
        return Err(ConfigError::RootNotDirectory(canonical));
    }
    Ok(canonical)
}

//! File set reconciliation
//!
//! Brings the registered source set and the node store in line with the
//! file system, and reports which paths need their node recomputed.

use crate::discovery::{discover, is_source_file};
use crate::error::EngineError;
use crate::exclusion::ExclusionSet;
use crate::sources::SourceSet;
use boundary_core::NodeStore;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Outcome of one reconciliation pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Paths whose node must be recomputed.
    pub affected: BTreeSet<PathBuf>,
    /// Paths dropped from the source set and node store.
    pub evicted: BTreeSet<PathBuf>,
}

/// Everything reconciliation reads or mutates, borrowed from the engine.
pub struct Reconciler<'a> {
    pub root: &'a Path,
    pub exclusions: &'a ExclusionSet,
    pub sources: &'a mut SourceSet,
    pub store: &'a mut NodeStore,
}

impl Reconciler<'_> {
    /// Full scan when `changed` is empty, incremental otherwise. The
    /// deletion pass runs once at the end in both modes.
    pub fn reconcile(&mut self, changed: &[PathBuf]) -> Result<Reconciliation, EngineError> {
        let mut outcome = if changed.is_empty() {
            self.full_scan()?
        } else {
            self.incremental(changed)
        };

        self.deletion_pass(&mut outcome);

        tracing::debug!(
            "Reconciled: {} affected, {} evicted",
            outcome.affected.len(),
            outcome.evicted.len()
        );
        Ok(outcome)
    }

    fn full_scan(&mut self) -> Result<Reconciliation, EngineError> {
        let discovered = discover(self.root, self.exclusions)?;
        let mut outcome = Reconciliation::default();

        let stale: BTreeSet<PathBuf> = self
            .sources
            .paths()
            .chain(self.store.paths())
            .filter(|p| !discovered.contains(*p))
            .cloned()
            .collect();
        for path in stale {
            self.evict(&path, &mut outcome);
        }

        for path in &discovered {
            self.load(path);
        }
        outcome.affected = discovered;
        Ok(outcome)
    }

    fn incremental(&mut self, changed: &[PathBuf]) -> Reconciliation {
        let mut outcome = Reconciliation::default();

        for path in changed {
            let path = if path.is_relative() {
                self.root.join(path)
            } else {
                path.clone()
            };

            if !is_source_file(&path) || self.exclusions.is_excluded(&path) {
                tracing::debug!("Out of scope: {}", path.display());
                self.evict(&path, &mut outcome);
                continue;
            }

            self.load(&path);
            // Affected even when loading failed, so the node gets dropped.
            outcome.affected.insert(path);
        }

        outcome
    }

    /// Refresh a registered file or register a new one. Failures are
    /// transient and only logged.
    fn load(&mut self, path: &Path) {
        let result = if self.sources.contains(path) {
            self.sources.refresh(path)
        } else {
            self.sources.register(path)
        };
        if let Err(e) = result {
            tracing::debug!("Skipping {}: {}", path.display(), e);
        }
    }

    /// Drop every tracked file that no longer exists on disk.
    fn deletion_pass(&mut self, outcome: &mut Reconciliation) {
        let vanished: BTreeSet<PathBuf> = self
            .sources
            .paths()
            .chain(self.store.paths())
            .filter(|p| !p.exists())
            .cloned()
            .collect();
        for path in vanished {
            self.evict(&path, outcome);
        }
    }

    fn evict(&mut self, path: &Path, outcome: &mut Reconciliation) {
        let had_source = self.sources.remove(path).is_some();
        let had_node = self.store.remove(path).is_some();
        if had_source || had_node {
            tracing::debug!("Evicted {}", path.display());
            outcome.evicted.insert(path.to_path_buf());
        }
    }
}

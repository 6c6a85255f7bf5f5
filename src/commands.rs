//! CLI command implementations

use anyhow::Context;
use boundary_core::{
    GraphDiff, NodeStore, Snapshot, TypeSnapshot, diff_types, load_snapshot, save_snapshot,
    type_snapshot,
};
use boundary_indexer::{Engine, EngineConfig, ProjectConfig};
use boundary_watcher::WatcherService;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::broadcast;

/// Combine CLI flags with the project's `boundary.toml`.
pub fn engine_config(
    root: &Path,
    tsconfig: Option<PathBuf>,
    exclude: Vec<String>,
) -> anyhow::Result<EngineConfig> {
    let mut config = EngineConfig::new(root).with_exclude(exclude);
    if let Some(tsconfig) = tsconfig {
        // Relative to the working directory, like any other CLI path
        let tsconfig = std::path::absolute(&tsconfig)
            .with_context(|| format!("Invalid tsconfig path {}", tsconfig.display()))?;
        config = config.with_tsconfig(tsconfig);
    }
    if let Some(project) = ProjectConfig::load(root)? {
        tracing::debug!("Loaded {}", boundary_indexer::PROJECT_CONFIG);
        config = config.merge_project(project);
    }
    Ok(config)
}

pub fn scan(config: EngineConfig, json: bool, no_cache: bool) -> anyhow::Result<()> {
    let mut engine = Engine::new(config)?;
    let root = engine.root().to_path_buf();
    tracing::info!("Scanning project: {}", root.display());

    let previous = if no_cache {
        None
    } else {
        match load_snapshot(&root) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("Ignoring unreadable snapshot: {}", e);
                None
            }
        }
    };

    engine.build(&[])?;
    let graph = engine.graph();

    if let Some(previous) = previous.filter(|s| s.root == root) {
        let diff = diff_types(&snapshot_types(&previous), &type_snapshot(graph));
        tracing::info!(
            "Since last scan: {} added, {} removed, {} changed type",
            diff.added.len(),
            diff.removed.len(),
            diff.retyped.len()
        );
        for retyped in &diff.retyped {
            tracing::debug!(
                "{}: {} -> {}",
                relative(&root, &retyped.path).display(),
                type_label(retyped.previous),
                type_label(retyped.current)
            );
        }
    }

    if json {
        let snapshot = Snapshot::capture(graph, &root);
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", report(graph, &root));
    }

    if !no_cache {
        save_snapshot(graph, &root)?;
    }
    Ok(())
}

pub async fn watch(config: EngineConfig, debounce_ms: u64) -> anyhow::Result<()> {
    let engine = Engine::new(config)?;
    let root = engine.root().to_path_buf();
    tracing::info!("Starting file watcher for: {}", root.display());

    let (diff_tx, mut diff_rx) = broadcast::channel(64);
    let service = WatcherService::new(engine, diff_tx)?
        .with_debounce(Duration::from_millis(debounce_ms));

    tokio::spawn(async move {
        loop {
            match diff_rx.recv().await {
                Ok(diff) => print!("{}", diff_lines(&diff, &root)),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("Dropped {} graph updates", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    tokio::select! {
        result = service.run() => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Stopping file watcher");
            Ok(())
        }
    }
}

pub fn clear(root: PathBuf) -> anyhow::Result<()> {
    tracing::info!("Clearing cache for: {}", root.display());

    boundary_core::clear_cache(&root)?;

    tracing::info!("Cache cleared");
    Ok(())
}

/// One `path<TAB>type` line per node, sorted by path.
fn report(graph: &NodeStore, root: &Path) -> String {
    let mut out = String::new();
    for node in graph.snapshot() {
        out.push_str(&format!(
            "{}\t{}\n",
            relative(root, &node.file_path).display(),
            type_label(node.env_type)
        ));
    }
    out
}

fn diff_lines(diff: &GraphDiff, root: &Path) -> String {
    let mut out = String::new();
    for path in &diff.added {
        out.push_str(&format!("+ {}\n", relative(root, path).display()));
    }
    for path in &diff.removed {
        out.push_str(&format!("- {}\n", relative(root, path).display()));
    }
    for retyped in &diff.retyped {
        out.push_str(&format!(
            "~ {}\t{} -> {}\n",
            relative(root, &retyped.path).display(),
            type_label(retyped.previous),
            type_label(retyped.current)
        ));
    }
    out
}

fn snapshot_types(snapshot: &Snapshot) -> TypeSnapshot {
    snapshot
        .nodes
        .iter()
        .map(|node| (node.file_path.clone(), node.env_type))
        .collect()
}

fn relative<'a>(root: &Path, path: &'a Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}

fn type_label(env_type: Option<boundary_core::EnvironmentType>) -> &'static str {
    env_type.map_or("-", |t| t.as_str())
}

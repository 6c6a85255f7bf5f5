//! Source file discovery for full scans

use crate::error::EngineError;
use crate::exclusion::ExclusionSet;
use ignore::WalkBuilder;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Extensions that make a file part of the include scope.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

/// Check if a path is a source file we should analyze
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Walk `root` and return every in-scope, non-excluded source file.
///
/// Git ignore rules and hidden-file filtering are disabled; the exclusion set
/// alone decides membership.
pub fn discover(root: &Path, exclusions: &ExclusionSet) -> Result<BTreeSet<PathBuf>, EngineError> {
    let prune = exclusions.clone();
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            !(is_dir && entry.depth() > 0 && prune.excludes_dir(entry.path()))
        })
        .build();

    let mut found = BTreeSet::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                // A vanished root means the project itself is gone.
                if !root.is_dir() {
                    return Err(EngineError::Walk {
                        root: root.to_path_buf(),
                        source: e,
                    });
                }
                tracing::warn!("Cannot read entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_some_and(|t| t.is_file()) || !is_source_file(path) {
            continue;
        }
        if exclusions.is_excluded(path) {
            tracing::debug!("Excluded: {}", path.display());
            continue;
        }
        found.insert(path.to_path_buf());
    }

    tracing::debug!("Discovered {} source files under {}", found.len(), root.display());
    Ok(found)
}

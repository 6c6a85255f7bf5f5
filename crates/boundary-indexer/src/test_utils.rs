//! Test utilities for Boundary

use boundary_core::ModuleFacts;
use crate::error::AnalyzeError;
use crate::extractor::ModuleAnalyzer;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a project with a specific file structure
pub fn create_project(structure: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    for (path, content) in structure {
        write_file(root, path, content);
    }

    temp_dir
}

/// Write a file below `root`, creating parent directories if needed
pub fn write_file(root: &Path, path: &str, content: &str) -> PathBuf {
    let full_path = root.join(path);
    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&full_path, content).unwrap();
    full_path
}

/// Analyzer double that returns canned facts keyed by path.
///
/// Paths without canned facts analyze as plain files with no imports. Paths
/// listed in `broken` fail with a syntax error.
#[derive(Debug, Default)]
pub struct StubAnalyzer {
    pub facts: HashMap<PathBuf, ModuleFacts>,
    pub broken: Vec<PathBuf>,
    pub calls: Vec<PathBuf>,
}

impl StubAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<PathBuf>, is_client: bool, imports: &[PathBuf]) -> Self {
        self.facts.insert(
            path.into(),
            ModuleFacts {
                has_client_directive: is_client,
                imports: imports.to_vec(),
            },
        );
        self
    }
}

impl ModuleAnalyzer for StubAnalyzer {
    fn analyze(&mut self, path: &Path, _source: &str) -> Result<ModuleFacts, AnalyzeError> {
        self.calls.push(path.to_path_buf());
        if self.broken.iter().any(|p| p == path) {
            return Err(AnalyzeError::Syntax {
                path: path.to_path_buf(),
                line: 1,
            });
        }
        Ok(self.facts.get(path).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_project() {
        let temp_dir = create_project(&[("src/app/page.tsx", "export {}"), ("package.json", "{}")]);
        let root = temp_dir.path();

        assert!(root.join("src/app/page.tsx").exists());
        assert!(root.join("package.json").exists());
    }
}

//! Loaded source text for every registered file

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A registered file's current contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub text: String,
}

/// The set of files the engine has loaded from disk.
///
/// Membership here is what the reconciler adds to, refreshes and evicts;
/// graph nodes are only ever derived from files present in this set.
#[derive(Debug, Default)]
pub struct SourceSet {
    files: HashMap<PathBuf, SourceFile>,
}

impl SourceSet {
    pub fn new() -> Self {
        SourceSet {
            files: HashMap::new(),
        }
    }

    /// Load a file that is not yet registered.
    pub fn register(&mut self, path: &Path) -> std::io::Result<()> {
        let text = std::fs::read_to_string(path)?;
        self.files.insert(path.to_path_buf(), SourceFile { text });
        Ok(())
    }

    /// Re-read a registered file in place. On failure the stale entry is
    /// dropped so no outdated text survives.
    pub fn refresh(&mut self, path: &Path) -> std::io::Result<()> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                self.files.insert(path.to_path_buf(), SourceFile { text });
                Ok(())
            }
            Err(e) => {
                self.files.remove(path);
                Err(e)
            }
        }
    }

    pub fn remove(&mut self, path: &Path) -> Option<SourceFile> {
        self.files.remove(path)
    }

    pub fn get(&self, path: &Path) -> Option<&SourceFile> {
        self.files.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.keys()
    }
}

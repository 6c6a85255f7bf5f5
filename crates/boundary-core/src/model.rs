//! Core data structures for the dependency graph

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Runtime environment a file executes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentType {
    /// Runs in the browser bundle only.
    Client,
    /// Runs on the server only.
    Server,
    /// Imported from both sides, so it ships to both.
    Universal,
}

impl EnvironmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentType::Client => "client",
            EnvironmentType::Server => "server",
            EnvironmentType::Universal => "universal",
        }
    }
}

impl fmt::Display for EnvironmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an analyzer reports about a single source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleFacts {
    /// The first top-level statement is the client-marker directive.
    pub has_client_directive: bool,
    /// Resolved absolute import and re-export targets, in source order.
    pub imports: Vec<PathBuf>,
}

/// A single node in the dependency graph. One per analyzed file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileNode {
    pub file_path: PathBuf,
    /// Carries the directive itself; never propagated.
    pub is_client: bool,
    /// May contain duplicates and paths that are not nodes.
    pub imports: Vec<PathBuf>,
    /// Absent until the first classification pass.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub env_type: Option<EnvironmentType>,
}

impl FileNode {
    pub fn new(file_path: impl Into<PathBuf>, facts: ModuleFacts) -> Self {
        FileNode {
            file_path: file_path.into(),
            is_client: facts.has_client_directive,
            imports: facts.imports,
            env_type: None,
        }
    }

    /// Replace directive and import data, keeping the previous type until
    /// the next classification pass.
    pub fn update(&mut self, facts: ModuleFacts) {
        self.is_client = facts.has_client_directive;
        self.imports = facts.imports;
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

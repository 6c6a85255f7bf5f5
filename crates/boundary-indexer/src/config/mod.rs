//! Engine and project configuration

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Optional per-project config file at the project root.
pub const PROJECT_CONFIG: &str = "boundary.toml";

/// Construction parameters for [`crate::Engine`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Project root. Canonicalized when the engine is built.
    pub root: PathBuf,
    /// Explicit `tsconfig.json`/`jsconfig.json`. Auto-detected when `None`.
    pub tsconfig: Option<PathBuf>,
    /// Extra exclude globs appended to the defaults.
    pub exclude: Vec<String>,
}

impl EngineConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        EngineConfig {
            root: root.into(),
            tsconfig: None,
            exclude: Vec::new(),
        }
    }

    pub fn with_tsconfig(mut self, tsconfig: impl Into<PathBuf>) -> Self {
        self.tsconfig = Some(tsconfig.into());
        self
    }

    pub fn with_exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Fold in settings from `boundary.toml`.
    ///
    /// An explicit tsconfig already set here wins; exclude lists are
    /// concatenated with the file's patterns first.
    pub fn merge_project(mut self, project: ProjectConfig) -> Self {
        if self.tsconfig.is_none() {
            self.tsconfig = project.tsconfig.map(|p| {
                if p.is_absolute() { p } else { self.root.join(p) }
            });
        }
        let mut exclude = project.exclude;
        exclude.append(&mut self.exclude);
        self.exclude = exclude;
        self
    }
}

/// Contents of `boundary.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub tsconfig: Option<PathBuf>,
    pub exclude: Vec<String>,
}

impl ProjectConfig {
    /// Load `boundary.toml` from `root`. Returns `Ok(None)` when absent.
    pub fn load(root: &Path) -> Result<Option<Self>, ConfigError> {
        let path = root.join(PROJECT_CONFIG);
        if !path.is_file() {
            return Ok(None);
        }

        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::ProjectFileIo {
            path: path.clone(),
            source,
        })?;
        let config = toml::from_str(&text)
            .map_err(|source| ConfigError::ProjectFile { path, source })?;
        Ok(Some(config))
    }
}

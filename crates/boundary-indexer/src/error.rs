//! Error types for indexing and engine construction

use std::path::PathBuf;

/// Fatal problems with the engine's configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("project root {path} is not accessible: {source}")]
    RootUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("project root {0} is not a directory")]
    RootNotDirectory(PathBuf),

    #[error("module resolution config {0} does not exist")]
    MissingResolutionConfig(PathBuf),

    #[error("invalid exclude pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("failed to read {path}: {source}")]
    ProjectFileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed project config {path}: {source}")]
    ProjectFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Why a single file could not be analyzed.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("unsupported file type: {0}")]
    Unsupported(PathBuf),

    #[error("failed to load grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("parser produced no tree for {0}")]
    NoTree(PathBuf),

    #[error("syntax error in {path} at line {line}")]
    Syntax { path: PathBuf, line: usize },
}

/// Failures that abort a whole build.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to walk {root}: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: ignore::Error,
    },
}

//! Tree-sitter parsing for TypeScript and JavaScript sources

use crate::error::AnalyzeError;
use std::path::Path;
use tree_sitter::{Language, Parser, Tree};

/// Grammar used for a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// `.ts`, `.mts`, `.cts`
    TypeScript,
    /// `.tsx` and every JavaScript flavour, which may contain JSX
    Tsx,
}

impl FileType {
    /// Determine file type from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext {
            "ts" | "mts" | "cts" => Some(FileType::TypeScript),
            "tsx" | "js" | "jsx" | "mjs" | "cjs" => Some(FileType::Tsx),
            _ => None,
        }
    }

    /// Get the tree-sitter language for this file type
    pub fn language(&self) -> Language {
        match self {
            FileType::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            FileType::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// A reusable parser that switches grammar per file.
pub struct SourceParser {
    parser: Parser,
    current: Option<FileType>,
}

impl std::fmt::Debug for SourceParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceParser")
            .field("current", &self.current)
            .finish()
    }
}

impl SourceParser {
    pub fn new() -> Self {
        SourceParser {
            parser: Parser::new(),
            current: None,
        }
    }

    /// Parse `source` with the grammar matching `path`'s extension.
    pub fn parse(&mut self, path: &Path, source: &str) -> Result<Tree, AnalyzeError> {
        let file_type =
            FileType::from_path(path).ok_or_else(|| AnalyzeError::Unsupported(path.to_path_buf()))?;

        if self.current != Some(file_type) {
            self.parser.set_language(&file_type.language())?;
            self.current = Some(file_type);
        }

        self.parser
            .parse(source, None)
            .ok_or_else(|| AnalyzeError::NoTree(path.to_path_buf()))
    }
}

impl Default for SourceParser {
    fn default() -> Self {
        Self::new()
    }
}

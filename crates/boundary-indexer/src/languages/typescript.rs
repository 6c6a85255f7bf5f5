//! TypeScript/JavaScript module analyzer using tree-sitter

use crate::error::AnalyzeError;
use crate::extractor::ModuleAnalyzer;
use crate::parser::SourceParser;
use crate::resolver::ModuleResolver;
use boundary_core::ModuleFacts;
use std::path::{Path, PathBuf};
use tree_sitter::Node;

/// Directive that marks a file as client-only.
pub const CLIENT_DIRECTIVE: &str = "use client";

pub struct TypeScriptAnalyzer {
    parser: SourceParser,
    resolver: ModuleResolver,
}

impl TypeScriptAnalyzer {
    pub fn new(resolver: ModuleResolver) -> Self {
        Self {
            parser: SourceParser::new(),
            resolver,
        }
    }

    pub fn resolver(&self) -> &ModuleResolver {
        &self.resolver
    }
}

impl std::fmt::Debug for TypeScriptAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeScriptAnalyzer")
            .field("resolver", &self.resolver)
            .finish()
    }
}

impl ModuleAnalyzer for TypeScriptAnalyzer {
    fn analyze(&mut self, path: &Path, source: &str) -> Result<ModuleFacts, AnalyzeError> {
        let tree = self.parser.parse(path, source)?;
        let root = tree.root_node();
        if root.has_error() {
            return Err(AnalyzeError::Syntax {
                path: path.to_path_buf(),
                line: first_error_line(root),
            });
        }

        let source = source.as_bytes();
        // A hash-bang line is not a statement.
        let first = match root.named_child(0) {
            Some(node) if node.kind() == "hash_bang_line" => root.named_child(1),
            first => first,
        };
        let has_client_directive = first.is_some_and(|first| is_client_directive(first, source));

        let imports: Vec<PathBuf> = import_specifiers(root, source)
            .into_iter()
            .filter_map(|specifier| self.resolver.resolve(path, &specifier))
            .collect();

        tracing::debug!(
            "Analyzed {}: client={}, {} resolved imports",
            path.display(),
            has_client_directive,
            imports.len()
        );

        Ok(ModuleFacts {
            has_client_directive,
            imports,
        })
    }
}

/// `"use client"` or `'use client'` as a bare expression statement.
///
/// Comments are named children of `program`, so a leading comment pushes the
/// directive out of first position.
fn is_client_directive(statement: Node, source: &[u8]) -> bool {
    if statement.kind() != "expression_statement" || statement.named_child_count() != 1 {
        return false;
    }
    let Some(expression) = statement.named_child(0) else {
        return false;
    };
    if expression.kind() != "string" {
        return false;
    }
    match expression.utf8_text(source) {
        Ok(text) => {
            text == format!("\"{}\"", CLIENT_DIRECTIVE) || text == format!("'{}'", CLIENT_DIRECTIVE)
        }
        Err(_) => false,
    }
}

/// Specifiers of top-level static imports and re-exports, in source order.
fn import_specifiers(root: Node, source: &[u8]) -> Vec<String> {
    let mut specifiers = Vec::new();
    let mut cursor = root.walk();
    for statement in root.named_children(&mut cursor) {
        if !matches!(statement.kind(), "import_statement" | "export_statement") {
            continue;
        }
        let Some(source_node) = statement.child_by_field_name("source") else {
            continue;
        };
        if let Some(specifier) = string_value(source_node, source) {
            specifiers.push(specifier);
        }
    }
    specifiers
}

fn string_value(node: Node, source: &[u8]) -> Option<String> {
    let text = node.utf8_text(source).ok()?;
    let inner = text
        .strip_prefix(['"', '\''])
        .and_then(|t| t.strip_suffix(['"', '\'']))?;
    Some(inner.to_string())
}

fn first_error_line(node: Node) -> usize {
    if node.is_error() || node.is_missing() {
        return node.start_position().row + 1;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            return first_error_line(child);
        }
    }
    node.start_position().row + 1
}

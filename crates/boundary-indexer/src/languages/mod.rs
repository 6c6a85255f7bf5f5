//! Language analyzers

pub mod typescript;

pub use typescript::{CLIENT_DIRECTIVE, TypeScriptAnalyzer};

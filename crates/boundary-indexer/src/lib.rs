//! Source discovery, module analysis, and the dependency graph engine

pub mod config;
pub mod coordinator;
pub mod discovery;
pub mod error;
pub mod exclusion;
pub mod extractor;
pub mod languages;
pub mod parser;
pub mod reconcile;
pub mod resolver;
pub mod sources;

#[cfg(test)]
pub mod test_utils;


pub use config::{EngineConfig, PROJECT_CONFIG, ProjectConfig};
pub use coordinator::Engine;
pub use discovery::{SOURCE_EXTENSIONS, discover, is_source_file};
pub use error::{AnalyzeError, ConfigError, EngineError};
pub use exclusion::{DEFAULT_EXCLUDES, ExclusionSet};
pub use extractor::ModuleAnalyzer;
pub use languages::{CLIENT_DIRECTIVE, TypeScriptAnalyzer};
pub use parser::{FileType, SourceParser};
pub use reconcile::{Reconciler, Reconciliation};
pub use resolver::ModuleResolver;
pub use sources::{SourceFile, SourceSet};

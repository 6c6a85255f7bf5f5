//! Module analyzer trait definition

use crate::error::AnalyzeError;
use boundary_core::ModuleFacts;
use std::path::Path;

/// Turns one source file into its directive flag and resolved imports.
///
/// The engine calls this for every affected file that is still registered.
/// Returning an error leaves the file out of the graph until a later build
/// analyzes it successfully.
pub trait ModuleAnalyzer: Send {
    fn analyze(&mut self, path: &Path, source: &str) -> Result<ModuleFacts, AnalyzeError>;
}

impl<A: ModuleAnalyzer + ?Sized> ModuleAnalyzer for Box<A> {
    fn analyze(&mut self, path: &Path, source: &str) -> Result<ModuleFacts, AnalyzeError> {
        (**self).analyze(path, source)
    }
}

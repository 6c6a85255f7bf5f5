//! Import specifier resolution

use oxc_resolver::{ResolveOptions, Resolver, TsconfigOptions, TsconfigReferences};
use std::path::{Path, PathBuf};

/// Extensions tried, in order, for extensionless specifiers.
pub const RESOLVE_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".mts", ".cts", ".js", ".jsx", ".mjs", ".cjs"];

/// Resolves import specifiers to absolute file paths, honouring the
/// project's `tsconfig.json` `baseUrl` and `paths`.
pub struct ModuleResolver {
    resolver: Resolver,
    tsconfig: Option<PathBuf>,
}

impl std::fmt::Debug for ModuleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleResolver")
            .field("tsconfig", &self.tsconfig)
            .finish()
    }
}

impl ModuleResolver {
    pub fn new(tsconfig: Option<PathBuf>) -> Self {
        let resolver = Resolver::new(ResolveOptions {
            tsconfig: tsconfig.clone().map(|config_file| TsconfigOptions {
                config_file,
                references: TsconfigReferences::Auto,
            }),
            condition_names: vec!["import".into(), "module".into(), "default".into()],
            extensions: RESOLVE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            ..ResolveOptions::default()
        });

        ModuleResolver { resolver, tsconfig }
    }

    pub fn tsconfig(&self) -> Option<&Path> {
        self.tsconfig.as_deref()
    }

    /// Resolve `specifier` as written in `importer`. Returns `None` when it
    /// does not lead to a concrete file.
    pub fn resolve(&self, importer: &Path, specifier: &str) -> Option<PathBuf> {
        let dir = importer.parent()?;
        match self.resolver.resolve(dir, specifier) {
            Ok(resolution) => Some(resolution.into_path_buf()),
            Err(e) => {
                tracing::debug!(
                    "Unresolved import `{}` in {}: {}",
                    specifier,
                    importer.display(),
                    e
                );
                None
            }
        }
    }
}

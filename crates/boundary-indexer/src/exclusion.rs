//! Exclusion predicate over project files

use crate::error::ConfigError;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};

/// Files and directories that never become graph nodes.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    // tests, stories, mocks
    "**/*.test.*",
    "**/*.spec.*",
    "**/*.stories.*",
    "**/*.story.*",
    "**/__tests__/**",
    "**/__mocks__/**",
    // declarations and tool config
    "**/*.d.ts",
    "**/*.d.mts",
    "**/*.d.cts",
    "**/*.config.*",
    // dependencies, build output, VCS
    "**/node_modules/**",
    "**/.next/**",
    "**/dist/**",
    "**/build/**",
    "**/out/**",
    "**/coverage/**",
    "**/.git/**",
    "**/.turbo/**",
];

/// Suffix that makes a pattern cover a whole directory tree.
const TREE_SUFFIX: &str = "/**";

/// Compiled default + user exclude patterns.
///
/// Files under the root are matched by their root-relative path, so the
/// directories above the project never take part. Absolute user patterns are
/// matched against absolute paths. Candidates and patterns are compared in
/// POSIX form; matching is case-sensitive, `*` stays within one path segment,
/// and wildcards match dotfiles.
#[derive(Debug, Clone)]
pub struct ExclusionSet {
    root: PathBuf,
    relative: Matcher,
    absolute: Matcher,
    patterns: Vec<String>,
}

/// File globs plus the directory form of every `dir/**` pattern among them.
#[derive(Debug, Clone)]
struct Matcher {
    files: GlobSet,
    dirs: GlobSet,
}

impl ExclusionSet {
    /// Build the set for a project rooted at `root`.
    ///
    /// Relative user patterns apply below the root; a leading `./` is
    /// ignored. Absolute patterns are used as given.
    pub fn new<S: AsRef<str>>(root: &Path, user_patterns: &[S]) -> Result<Self, ConfigError> {
        let mut relative: Vec<String> = DEFAULT_EXCLUDES.iter().map(|p| p.to_string()).collect();
        let mut absolute = Vec::new();
        for pattern in user_patterns {
            let pattern = pattern.as_ref().replace('\\', "/");
            if pattern.starts_with('/') {
                absolute.push(pattern);
            } else {
                relative.push(pattern.trim_start_matches("./").to_string());
            }
        }

        let set = ExclusionSet {
            root: root.to_path_buf(),
            relative: Matcher::new(&relative)?,
            absolute: Matcher::new(&absolute)?,
            patterns: relative.into_iter().chain(absolute).collect(),
        };
        Ok(set)
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.absolute.files.is_match(to_posix(path)) {
            return true;
        }
        path.strip_prefix(&self.root)
            .is_ok_and(|relative| self.relative.files.is_match(to_posix(relative)))
    }

    /// True when `dir` is itself covered by a `dir/**` pattern, so a walk can
    /// skip its whole subtree.
    pub fn excludes_dir(&self, dir: &Path) -> bool {
        if self.absolute.dirs.is_match(to_posix(dir)) {
            return true;
        }
        dir.strip_prefix(&self.root)
            .is_ok_and(|relative| self.relative.dirs.is_match(to_posix(relative)))
    }

    /// Every active pattern as written, defaults first.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl Matcher {
    fn new(patterns: &[String]) -> Result<Self, ConfigError> {
        let dirs: Vec<String> = patterns
            .iter()
            .filter_map(|p| p.strip_suffix(TREE_SUFFIX))
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Matcher {
            files: compile(patterns)?,
            dirs: compile(&dirs)?,
        })
    }
}

fn compile(patterns: &[String]) -> Result<GlobSet, ConfigError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ConfigError::InvalidPattern {
        pattern: patterns.join(", "),
        source,
    })
}

fn to_posix(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

//! Project detection

use std::path::{Path, PathBuf};

/// Module-resolution config files, in lookup order.
pub const RESOLUTION_CONFIGS: [&str; 2] = ["tsconfig.json", "jsconfig.json"];

/// Find the module-resolution config at the project root, if any.
pub fn detect_resolution_config(root: &Path) -> Option<PathBuf> {
    RESOLUTION_CONFIGS
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

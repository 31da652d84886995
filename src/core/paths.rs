//! Identifier derivation
//!
//! Directory-sourced files are keyed by their path relative to the walk root,
//! explicitly listed files by their basename.

use std::path::Path;

/// Path of `path` relative to `root`, rendered with the platform separator.
///
/// Returns `None` when `path` is not under `root`. The root itself maps to `"."`.
pub fn relative_identifier(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    if relative.as_os_str().is_empty() {
        return Some(".".to_string());
    }
    Some(relative.to_string_lossy().into_owned())
}

/// Final component of `path`, or the whole path if it has none
pub fn basename_identifier(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

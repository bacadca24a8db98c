//! Path utilities for user supplied locations.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// `--db` value as a string path, with `~` expanded.
pub fn resolve_db_path(path: &str) -> String {
    expand_tilde(path).to_string_lossy().to_string()
}

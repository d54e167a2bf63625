use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::{BUNDLED_CASCADE_DIR, BUNDLED_CASCADE_DIR_ENV, SYSTEM_CASCADE_DIR};

#[derive(Error, Debug)]
pub enum CascadeResolveError {
    #[error("cascade file {name} not found; searched: {}", format_searched(.searched))]
    NotFound { name: String, searched: Vec<PathBuf> },
}

fn format_searched(searched: &[PathBuf]) -> String {
    searched
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Ordered list of directories searched for cascade definitions.
///
/// Resolution order:
/// 1. Explicit override (e.g. `--cascade-dir`)
/// 2. Current working directory
/// 3. OpenCV bundled data directory
/// 4. Distribution-wide install path
pub fn search_dirs(override_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut dirs = Vec::with_capacity(4);
    if let Some(dir) = override_dir {
        dirs.push(dir.to_path_buf());
    }
    dirs.push(PathBuf::from("."));
    dirs.push(bundled_data_dir());
    dirs.push(PathBuf::from(SYSTEM_CASCADE_DIR));
    dirs
}

/// Directory holding the cascades installed alongside the vision library.
pub fn bundled_data_dir() -> PathBuf {
    std::env::var_os(BUNDLED_CASCADE_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(BUNDLED_CASCADE_DIR))
}

/// Returns the first `dir/name` that exists, in `dirs` order.
pub fn resolve(name: &str, dirs: &[PathBuf]) -> Result<PathBuf, CascadeResolveError> {
    let candidates: Vec<PathBuf> = dirs.iter().map(|d| d.join(name)).collect();
    if let Some(found) = candidates.iter().find(|p| p.is_file()) {
        return Ok(found.clone());
    }
    Err(CascadeResolveError::NotFound {
        name: name.to_string(),
        searched: candidates,
    })
}

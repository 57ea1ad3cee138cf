//! Configuration management

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable overriding the key home
pub const HOME_ENV: &str = "OTRBOX_HOME";

/// Resolve the directory holding the key files.
///
/// Order: explicit `--key-dir`, then `$OTRBOX_HOME`, then the working directory.
pub fn key_home(key_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = key_dir {
        return Ok(dir.to_path_buf());
    }
    if let Some(path) = std::env::var_os(HOME_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    std::env::current_dir().context("Could not determine the working directory")
}

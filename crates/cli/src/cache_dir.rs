//! Image cache directory resolution.

use std::path::{Path, PathBuf};

use apod_core::Error;

/// Validate the cache directory, creating it if it does not exist yet.
///
/// The path must be absolute and must not name an existing regular file.
pub fn resolve_cache_dir(dir: &Path) -> Result<PathBuf, Error> {
    if !dir.is_absolute() {
        return Err(Error::InvalidInput(format!("image cache path '{}' must be absolute", dir.display())));
    }

    if dir.is_dir() {
        tracing::info!(cache_dir = %dir.display(), "using image cache directory");
        return Ok(dir.to_path_buf());
    }

    if dir.exists() {
        return Err(Error::InvalidInput(format!("image cache path '{}' is an existing file", dir.display())));
    }

    std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    tracing::info!(cache_dir = %dir.display(), "created image cache directory");

    Ok(dir.to_path_buf())
}

//! Deterministic file naming for cached images.

use std::path::{Path, PathBuf};

/// Build the cache file path for an image.
///
/// The extension is everything after the last `.` of `source_url`. The base
/// name is the trimmed title with spaces turned into underscores and every
/// remaining character that is not alphanumeric or `_` dropped. A title that
/// strips down to nothing gives `cache_dir/.ext`.
///
/// Pure string manipulation; the filesystem is never touched.
pub fn derive_path(cache_dir: &Path, title: &str, source_url: &str) -> PathBuf {
    let extension = source_url.rsplit('.').next().unwrap_or(source_url);
    let base_name: String = title
        .trim()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();

    cache_dir.join(format!("{base_name}.{extension}"))
}

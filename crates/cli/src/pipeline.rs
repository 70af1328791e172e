//! Fetch, cache and apply one APOD.

use std::path::Path;

use apod_client::{ApodInfo, ImageSource, MetadataSource};
use apod_core::{CacheEntry, Error, ImageCache, compute_fingerprint, derive_path};
use chrono::NaiveDate;

use crate::wallpaper::WallpaperSetter;

/// Receives the image details as soon as the content is fingerprinted,
/// before anything is written or the background is changed.
pub trait Reporter: Send + Sync {
    fn image_info(&self, info: &ApodInfo, image_url: &str, entry: &CacheEntry);
}

/// Collaborators for a single run.
pub struct Pipeline<'a> {
    pub cache: &'a ImageCache,
    pub cache_dir: &'a Path,
    pub metadata: &'a dyn MetadataSource,
    pub images: &'a dyn ImageSource,
    /// `None` skips the desktop background step.
    pub wallpaper: Option<&'a dyn WallpaperSetter>,
    pub reporter: &'a dyn Reporter,
}

/// What a run did.
#[derive(Debug)]
pub struct Outcome {
    /// The indexed entry the wallpaper points at.
    pub entry: CacheEntry,
    /// False when the content was already in the cache.
    pub newly_cached: bool,
    pub wallpaper_set: bool,
}

impl Pipeline<'_> {
    /// Run the whole flow for `date`, stopping at the first error.
    ///
    /// On a cache hit the already indexed entry is reused, so the wallpaper
    /// points at the file that actually holds the bytes even if the title
    /// changed since it was stored.
    pub async fn run(&self, date: NaiveDate) -> Result<Outcome, Error> {
        let info = self.metadata.fetch_info(date).await?;
        let image_url = info.image_url()?.to_string();
        let path = derive_path(self.cache_dir, &info.title, &image_url);

        tracing::info!(date = %date, title = %info.title, url = %image_url, "resolved APOD image");

        let bytes = self.images.download(&image_url).await?;
        let fingerprint = compute_fingerprint(&bytes);

        tracing::info!(hash = %fingerprint.hash, size = fingerprint.size, "fingerprinted image");

        let (entry, newly_cached) = if self.cache.contains(&fingerprint.hash).await? {
            let entry = self.cache.get_entry(&fingerprint.hash).await?.ok_or_else(|| {
                Error::InvalidInput(format!("index entry {} disappeared during lookup", fingerprint.hash))
            })?;
            (entry, false)
        } else {
            let entry = CacheEntry {
                title: info.title.clone(),
                path,
                size_bytes: fingerprint.size,
                content_hash: fingerprint.hash,
            };
            (entry, true)
        };

        self.reporter.image_info(&info, &image_url, &entry);

        if newly_cached {
            self.cache.store(&bytes, &entry).await?;
            tracing::info!(path = %entry.path.display(), "image added to cache");
        } else {
            tracing::info!(path = %entry.path.display(), "image already cached");
        }

        let wallpaper_set = match self.wallpaper {
            Some(setter) => {
                setter.set(&entry.path).await?;
                true
            }
            None => false,
        };

        Ok(Outcome { entry, newly_cached, wallpaper_set })
    }
}

//! Cache entry operations.
//!
//! Presence checks, lookups and the write-then-index store path for
//! cached images.

use std::path::PathBuf;

use super::connection::ImageCache;
use super::hash::{compute_fingerprint, validate_hash};
use crate::Error;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

/// A cached image as recorded in the index.
///
/// Entries are written once, at first sight of a content hash, and never
/// updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub title: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    /// Uppercase hex SHA-256 of the stored bytes.
    pub content_hash: String,
}

impl CacheEntry {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(CacheEntry {
            content_hash: row.get(0)?,
            title: row.get(1)?,
            path: PathBuf::from(row.get::<_, String>(2)?),
            size_bytes: row.get::<_, i64>(3)? as u64,
        })
    }
}

impl ImageCache {
    /// Check whether an image with this content hash is already indexed.
    pub async fn contains(&self, hash: &str) -> Result<bool, Error> {
        validate_hash(hash)?;
        let hash = hash.to_string();
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let present: bool = conn
                    .query_row(
                        "SELECT EXISTS(SELECT 1 FROM images WHERE content_hash = ?1)",
                        params![hash],
                        |row| row.get(0),
                    )
                    .map_err(Error::from)?;
                Ok(present)
            })
            .await
            .map_err(Error::from)
    }

    /// Get the indexed entry for a content hash.
    ///
    /// Returns None if the hash isn't in the index.
    pub async fn get_entry(&self, hash: &str) -> Result<Option<CacheEntry>, Error> {
        validate_hash(hash)?;
        let hash = hash.to_string();
        self.conn
            .call(move |conn| -> Result<Option<CacheEntry>, Error> {
                let mut stmt =
                    conn.prepare("SELECT content_hash, title, path, size_bytes FROM images WHERE content_hash = ?1")?;

                let result = stmt.query_row(params![hash], CacheEntry::from_row);

                match result {
                    Ok(entry) => Ok(Some(entry)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// All indexed entries, oldest first.
    pub async fn list_entries(&self) -> Result<Vec<CacheEntry>, Error> {
        self.conn
            .call(|conn| -> Result<Vec<CacheEntry>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT content_hash, title, path, size_bytes FROM images ORDER BY added_at ASC, rowid ASC",
                )?;
                let entries = stmt
                    .query_map([], CacheEntry::from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(entries)
            })
            .await
            .map_err(Error::from)
    }

    /// Persist `bytes` at `entry.path` and then record `entry` in the index.
    ///
    /// The index row is only inserted after the file write succeeded, so a
    /// failure in between can leave an unindexed file but never an indexed
    /// entry without its file. Existing files at `entry.path` are
    /// overwritten; callers check [`ImageCache::contains`] first.
    ///
    /// # Errors
    ///
    /// - `InvalidHash` / `InvalidInput` if the entry does not describe `bytes`
    /// - `Io` if the file cannot be written (missing directory, permissions, disk full)
    /// - `Database` if the insert fails, including a hash that is already indexed
    pub async fn store(&self, bytes: &[u8], entry: &CacheEntry) -> Result<(), Error> {
        validate_hash(&entry.content_hash)?;

        let fingerprint = compute_fingerprint(bytes);
        if fingerprint.hash != entry.content_hash {
            return Err(Error::InvalidInput(format!(
                "content hash {} does not match bytes ({})",
                entry.content_hash, fingerprint.hash
            )));
        }
        if fingerprint.size != entry.size_bytes {
            return Err(Error::InvalidInput(format!(
                "size {} does not match bytes ({})",
                entry.size_bytes, fingerprint.size
            )));
        }

        tokio::fs::write(&entry.path, bytes)
            .await
            .map_err(|e| Error::io(&entry.path, e))?;

        tracing::debug!(path = %entry.path.display(), size = entry.size_bytes, "wrote cached image");

        let entry = entry.clone();
        let added_at = chrono::Utc::now().to_rfc3339();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO images (content_hash, title, path, size_bytes, added_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        &entry.content_hash,
                        &entry.title,
                        entry.path.to_string_lossy().into_owned(),
                        entry.size_bytes as i64,
                        added_at,
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }
}

//! Content-addressed image cache backed by a SQLite index.
//!
//! Image bytes live as plain files in the cache directory; the index maps
//! each SHA-256 content hash to the title, path and size of the stored copy.
//!
//! - Deterministic file naming derived from the APOD title and source URL
//! - Content fingerprinting (uppercase hex SHA-256)
//! - Durable index with automatic schema migrations
//! - No eviction: the cache grows without bound
//!
//! The index is not locked across processes. Two `apod` runs against the
//! same cache directory at the same time race on the index.

pub mod connection;
pub mod entries;
pub mod hash;
pub mod migrations;
pub mod naming;

pub use crate::Error;

pub use connection::{DEFAULT_DB_FILE_NAME, ImageCache};
pub use entries::CacheEntry;
pub use hash::{Fingerprint, compute_fingerprint, validate_hash};
pub use naming::derive_path;

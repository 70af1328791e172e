//! Unified error types for apod-wallpaper.
//!
//! Every variant is terminal for the current run; nothing in the library
//! retries or exits the process.

use std::path::PathBuf;

use tokio_rusqlite::rusqlite;

/// Unified error types for the cache, the fetch clients and the wallpaper step.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed or missing required input.
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Content hash is not 64 uppercase hex characters.
    #[error("INVALID_HASH: {0}")]
    InvalidHash(String),

    /// Filesystem operation failed.
    #[error("IO_ERROR: {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Metadata or image retrieval failed.
    ///
    /// `status` is set when the server answered with a non-success code.
    #[error("FETCH_ERROR: {}", fetch_message(.status, .reason))]
    Fetch { status: Option<u16>, reason: String },

    /// Index database operation failed.
    #[error("CACHE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("CACHE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// Setting the desktop background failed.
    #[error("WALLPAPER_ERROR: {0}")]
    Wallpaper(String),
}

fn fetch_message(status: &Option<u16>, reason: &str) -> String {
    match status {
        Some(code) => format!("status {code}: {reason}"),
        None => reason.to_string(),
    }
}

impl Error {
    /// Build an `Io` error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    /// Build a `Fetch` error carrying an HTTP status code.
    pub fn fetch_status(status: u16, reason: impl Into<String>) -> Self {
        Error::Fetch { status: Some(status), reason: reason.into() }
    }

    /// Build a `Fetch` error without a status code (network, parse, media type).
    pub fn fetch(reason: impl Into<String>) -> Self {
        Error::Fetch { status: None, reason: reason.into() }
    }

    /// The HTTP status code attached to a fetch error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Fetch { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

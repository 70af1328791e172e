//! Core types and shared functionality for apod-wallpaper.
//!
//! This crate provides:
//! - Content-addressed image cache with a SQLite index
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheEntry, Fingerprint, ImageCache, compute_fingerprint, derive_path};
pub use config::{AppConfig, ConfigError};
pub use error::Error;

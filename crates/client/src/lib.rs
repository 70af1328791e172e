//! Client code for apod-wallpaper.
//!
//! This crate provides the APOD metadata client, the image downloader and
//! the collaborator traits the `apod` pipeline is written against.

pub mod apod;
pub mod fetch;
pub mod source;

#[cfg(test)]
pub(crate) mod test_server;

pub use apod::{ApodClient, ApodConfig, ApodInfo, MediaType};
pub use fetch::{FetchClient, FetchConfig};
pub use source::{ImageSource, MetadataSource};

//! Collaborator traits for the wallpaper pipeline.
//!
//! The pipeline only sees these traits, so it can run against the real
//! NASA API or against in-memory fakes.

use apod_core::Error;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::NaiveDate;

use crate::apod::{ApodClient, ApodInfo};
use crate::fetch::FetchClient;

/// Something that can describe the APOD for a date.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn fetch_info(&self, date: NaiveDate) -> Result<ApodInfo, Error>;
}

/// Something that can download image bytes.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn download(&self, url: &str) -> Result<Bytes, Error>;
}

#[async_trait]
impl MetadataSource for ApodClient {
    async fn fetch_info(&self, date: NaiveDate) -> Result<ApodInfo, Error> {
        ApodClient::fetch_info(self, date).await
    }
}

#[async_trait]
impl ImageSource for FetchClient {
    async fn download(&self, url: &str) -> Result<Bytes, Error> {
        FetchClient::download(self, url).await
    }
}

//! APOD API response types.

use apod_core::Error;
use serde::{Deserialize, Serialize};

/// Kind of media an APOD entry points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaType {
    Image,
    Video,
    /// Anything the API may add later; not usable as a wallpaper.
    Other(String),
}

impl From<String> for MediaType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "image" => MediaType::Image,
            "video" => MediaType::Video,
            _ => MediaType::Other(value),
        }
    }
}

impl From<MediaType> for String {
    fn from(value: MediaType) -> Self {
        match value {
            MediaType::Image => "image".into(),
            MediaType::Video => "video".into(),
            MediaType::Other(other) => other,
        }
    }
}

/// Metadata for one Astronomy Picture of the Day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApodInfo {
    pub date: String,
    pub title: String,
    pub media_type: MediaType,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub hdurl: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
}

impl ApodInfo {
    /// URL of the picture to use as wallpaper.
    ///
    /// Images use `hdurl` (falling back to `url`), videos use their
    /// thumbnail. Any other media type is a fetch error.
    pub fn image_url(&self) -> Result<&str, Error> {
        let url = match &self.media_type {
            MediaType::Image => self.hdurl.as_deref().or(self.url.as_deref()),
            MediaType::Video => self.thumbnail_url.as_deref(),
            MediaType::Other(kind) => {
                return Err(Error::fetch(format!("unsupported media type '{kind}' for {}", self.date)));
            }
        };

        url.filter(|u| !u.trim().is_empty())
            .ok_or_else(|| Error::fetch(format!("APOD for {} has no image URL", self.date)))
    }
}

/// Error body returned by api.nasa.gov on failure.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    pub(crate) fn message(self) -> Option<String> {
        self.msg.or_else(|| self.error.and_then(|e| e.message))
    }
}

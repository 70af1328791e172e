//! Image download pipeline.
//!
//! ### URL Validation
//! - Trim whitespace, accept protocol-relative URLs as https
//! - Only http and https schemes
//!
//! ### Safety Gates
//! - Max redirects: 5
//! - Max body bytes: 50MB (configurable)
//!
//! Non-success status codes are returned as fetch errors carrying the code.

pub mod url;

use apod_core::{AppConfig, Error};
use bytes::Bytes;
use reqwest::{Client, header};
use std::time::{Duration, Instant};

pub use self::url::{UrlError, parse_image_url};

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "apod-wallpaper/0.1")
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 50MB)
    pub max_bytes: usize,

    /// Request timeout (default: 30s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "apod-wallpaper/0.1".to_string(),
            max_bytes: 50 * 1024 * 1024,
            timeout: Duration::from_millis(30000),
            max_redirects: 5,
        }
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            ..Default::default()
        }
    }
}

/// HTTP client that downloads image bytes into memory.
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::fetch(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Download `url_str`, returning the raw body.
    ///
    /// The bytes are not written anywhere; persisting them is the cache's job.
    pub async fn download(&self, url_str: &str) -> Result<Bytes, Error> {
        let start = Instant::now();
        let url = parse_image_url(url_str).map_err(|e| Error::InvalidInput(format!("{url_str}: {e}")))?;

        let response = self
            .http
            .get(url.as_str())
            .header(header::ACCEPT, "image/*,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::fetch(format!("timed out downloading {url}"))
                } else {
                    Error::fetch(format!("network error: {e}"))
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            return Err(Error::fetch_status(
                status.as_u16(),
                format!("downloading {url}: {}", status.canonical_reason().unwrap_or("request failed")),
            ));
        }

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(Error::fetch(format!("{} bytes exceeds {}", len, self.config.max_bytes)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::fetch(format!("failed to read response: {e}")))?;

        if bytes.len() > self.config.max_bytes {
            return Err(Error::fetch(format!("{} bytes exceeds {}", bytes.len(), self.config.max_bytes)));
        }

        tracing::debug!("downloaded {} in {}ms ({} bytes)", url, start.elapsed().as_millis(), bytes.len());

        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::TestServer;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.user_agent, "apod-wallpaper/0.1");
        assert_eq!(config.max_bytes, 50 * 1024 * 1024);
        assert_eq!(config.timeout, Duration::from_millis(30000));
        assert_eq!(config.max_redirects, 5);
    }

    #[test]
    fn test_fetch_config_from_app_config() {
        let app = AppConfig { max_bytes: 1024, user_agent: "custom/1.0".into(), ..Default::default() };
        let config = FetchConfig::from(&app);
        assert_eq!(config.max_bytes, 1024);
        assert_eq!(config.user_agent, "custom/1.0");
        assert_eq!(config.max_redirects, 5);
    }

    #[tokio::test]
    async fn test_download_returns_body() {
        let body = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A];
        let server = TestServer::respond(200, "image/png", body.clone()).await;
        let client = FetchClient::new(FetchConfig::default()).unwrap();

        let bytes = client.download(&format!("{}/image/x.png", server.base_url)).await.unwrap();
        assert_eq!(bytes.as_ref(), body.as_slice());

        let request = server.request().await;
        assert!(request.starts_with("GET /image/x.png"));
    }

    #[tokio::test]
    async fn test_download_error_status_carries_code() {
        let server = TestServer::respond(404, "text/plain", "missing").await;
        let client = FetchClient::new(FetchConfig::default()).unwrap();

        let err = client.download(&format!("{}/gone.jpg", server.base_url)).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_download_too_large() {
        let server = TestServer::respond(200, "image/jpeg", vec![0u8; 64]).await;
        let config = FetchConfig { max_bytes: 16, ..Default::default() };
        let client = FetchClient::new(config).unwrap();

        let err = client.download(&format!("{}/big.jpg", server.base_url)).await.unwrap_err();
        assert!(err.to_string().contains("exceeds 16"));
    }

    #[tokio::test]
    async fn test_download_rejects_bad_url() {
        let client = FetchClient::new(FetchConfig::default()).unwrap();
        let err = client.download("ftp://apod.nasa.gov/x.jpg").await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}

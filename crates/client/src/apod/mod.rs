//! NASA APOD API client.
//!
//! ### Protocol
//!
//! - **Endpoint**: `https://api.nasa.gov/planetary/apod`
//! - **Authentication**: `api_key` query parameter, taken from configuration.
//! - **Query**: `date=YYYY-MM-DD`, `thumbs=true` so videos carry a thumbnail URL.
//! - **Failures**: non-success status codes surface as fetch errors carrying
//!   the code. Nothing is retried.

pub mod response;

pub use response::{ApodInfo, MediaType};

use apod_core::{AppConfig, Error};
use chrono::NaiveDate;
use reqwest::header;
use response::ApiErrorBody;
use std::time::{Duration, Instant};

/// Default APOD endpoint.
const DEFAULT_BASE_URL: &str = "https://api.nasa.gov/planetary/apod";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "apod-wallpaper/0.1";

/// APOD client configuration.
#[derive(Debug, Clone)]
pub struct ApodConfig {
    /// NASA API key.
    pub api_key: String,
    /// Endpoint URL (default: https://api.nasa.gov/planetary/apod).
    pub base_url: String,
    /// Request timeout (default: 30s).
    pub timeout: Duration,
    /// User-agent string.
    pub user_agent: String,
}

impl Default for ApodConfig {
    fn default() -> Self {
        Self {
            api_key: "DEMO_KEY".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&AppConfig> for ApodConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.api_base_url.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// APOD metadata client.
#[derive(Debug, Clone)]
pub struct ApodClient {
    http: reqwest::Client,
    config: ApodConfig,
}

impl ApodClient {
    /// Create a new APOD client with the given configuration.
    pub fn new(config: ApodConfig) -> Result<Self, Error> {
        if config.api_key.is_empty() {
            return Err(Error::InvalidInput("APOD api_key must not be empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .use_rustls_tls()
            .build()
            .map_err(|e| Error::fetch(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Fetch the APOD metadata for `date`.
    pub async fn fetch_info(&self, date: NaiveDate) -> Result<ApodInfo, Error> {
        let start = Instant::now();
        let date = date.format("%Y-%m-%d").to_string();

        tracing::debug!(date = %date, "requesting APOD metadata");

        let response = self
            .http
            .get(&self.config.base_url)
            .header(header::ACCEPT, "application/json")
            .query(&[("api_key", self.config.api_key.as_str()), ("date", date.as_str()), ("thumbs", "true")])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::fetch("APOD request timed out")
                } else {
                    Error::fetch(format!("network error: {}", e.without_url()))
                }
            })?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "APOD API response status");

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::fetch(format!("failed to read APOD response: {}", e.without_url())))?;

        if !status.is_success() {
            let reason = serde_json::from_slice::<ApiErrorBody>(&bytes)
                .ok()
                .and_then(ApiErrorBody::message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            return Err(Error::fetch_status(status.as_u16(), reason));
        }

        let info: ApodInfo = serde_json::from_slice(&bytes)
            .map_err(|e| Error::fetch(format!("malformed APOD response: {e}")))?;

        tracing::debug!(title = %info.title, "APOD metadata fetched in {:?}", start.elapsed());

        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::TestServer;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn client_for(server: &TestServer) -> ApodClient {
        ApodClient::new(ApodConfig {
            api_key: "test-key".into(),
            base_url: format!("{}/planetary/apod", server.base_url),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_config_from_app_config() {
        let app = AppConfig { api_key: "abc".into(), timeout_ms: 1500, ..Default::default() };
        let config = ApodConfig::from(&app);
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_millis(1500));
    }

    #[test]
    fn test_client_new_empty_key() {
        let config = ApodConfig { api_key: String::new(), ..Default::default() };
        assert!(matches!(ApodClient::new(config), Err(Error::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_fetch_info_sends_query() {
        let body = r#"{"date": "2024-01-15", "media_type": "image", "title": "Orion",
                       "hdurl": "https://apod.nasa.gov/image/orion.jpg"}"#;
        let server = TestServer::respond(200, "application/json", body).await;
        let client = client_for(&server);

        let info = client.fetch_info(date("2024-01-15")).await.unwrap();
        assert_eq!(info.title, "Orion");
        assert_eq!(info.image_url().unwrap(), "https://apod.nasa.gov/image/orion.jpg");

        let request = server.request().await;
        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("GET /planetary/apod?"));
        assert!(request_line.contains("api_key=test-key"));
        assert!(request_line.contains("date=2024-01-15"));
        assert!(request_line.contains("thumbs=true"));
    }

    #[tokio::test]
    async fn test_fetch_info_error_status() {
        let body = r#"{"code": 400, "msg": "Date must be between Jun 16, 1995 and today."}"#;
        let server = TestServer::respond(400, "application/json", body).await;
        let client = client_for(&server);

        let err = client.fetch_info(date("2024-01-15")).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert!(err.to_string().contains("Date must be between"));
    }

    #[tokio::test]
    async fn test_fetch_info_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApodClient::new(ApodConfig {
            api_key: "test-key".into(),
            base_url: format!("http://{addr}/planetary/apod"),
            ..Default::default()
        })
        .unwrap();

        let err = client.fetch_info(date("2024-01-15")).await.unwrap_err();
        assert!(matches!(err, Error::Fetch { status: None, .. }));
        assert!(err.to_string().contains("network error"));
        assert!(!err.to_string().contains("test-key"));
    }

    #[tokio::test]
    async fn test_fetch_info_malformed_body() {
        let server = TestServer::respond(200, "application/json", "not json").await;
        let client = client_for(&server);

        let err = client.fetch_info(date("2024-01-15")).await.unwrap_err();
        assert!(matches!(err, Error::Fetch { status: None, .. }));
        assert!(err.to_string().contains("malformed APOD response"));
    }
}

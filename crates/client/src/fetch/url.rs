//! Image URL validation before download.

/// Error type for image URL validation failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Parse and normalize an image URL taken from APOD metadata.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Give protocol-relative URLs (`//host/...`) the https scheme
/// 3. Require http or https
/// 4. Remove fragment (#...)
pub fn parse_image_url(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let url_str = if trimmed.starts_with("//") { format!("https:{trimmed}") } else { trimmed.to_string() };

    let mut parsed = url::Url::parse(&url_str).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    parsed.set_fragment(None);

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let url = parse_image_url("https://apod.nasa.gov/apod/image/2401/m1.jpg").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("apod.nasa.gov"));
        assert_eq!(url.path(), "/apod/image/2401/m1.jpg");
    }

    #[test]
    fn test_parse_protocol_relative() {
        let url = parse_image_url("//apod.nasa.gov/image/x.jpg").unwrap();
        assert_eq!(url.as_str(), "https://apod.nasa.gov/image/x.jpg");
    }

    #[test]
    fn test_parse_lowercases_host_and_drops_fragment() {
        let url = parse_image_url("  https://APOD.NASA.GOV/x.jpg#top  ").unwrap();
        assert_eq!(url.as_str(), "https://apod.nasa.gov/x.jpg");
    }

    #[test]
    fn test_parse_preserves_query() {
        let url = parse_image_url("https://img.youtube.com/vi/abc/0.jpg?v=2").unwrap();
        assert_eq!(url.query(), Some("v=2"));
    }

    #[test]
    fn test_parse_http_allowed() {
        let url = parse_image_url("http://apod.nasa.gov/x.jpg").unwrap();
        assert_eq!(url.scheme(), "http");
    }

    #[test]
    fn test_parse_unsupported_scheme() {
        let result = parse_image_url("file:///etc/passwd");
        assert!(matches!(result, Err(UrlError::UnsupportedScheme(_))));
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(parse_image_url(""), Err(UrlError::Empty)));
        assert!(matches!(parse_image_url("   "), Err(UrlError::Empty)));
    }

    #[test]
    fn test_parse_relative_path_rejected() {
        let result = parse_image_url("image/2401/m1.jpg");
        assert!(matches!(result, Err(UrlError::InvalidUrl(_))));
    }
}

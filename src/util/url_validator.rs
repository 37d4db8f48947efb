use thiserror::Error;
use url::Url;

/// Why a link was refused.
#[derive(Debug, Error)]
pub enum UrlValidationError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    #[error("URL has no host")]
    MissingHost,
}

fn validate_http(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str.trim())?;
    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }
    Ok(url)
}

/// Validate an article link before handing it to the system browser.
///
/// Only absolute http(s) URLs with a host pass; `file:`, `javascript:` and
/// friends are refused so a hostile API payload cannot launch local handlers.
pub fn validate_url_for_open(url_str: &str) -> Result<Url, UrlValidationError> {
    validate_http(url_str)
}

/// Validate a thumbnail URL. Anything that fails renders as a placeholder.
pub fn validate_image_url(url_str: &str) -> Result<Url, UrlValidationError> {
    validate_http(url_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_url_for_open("https://news.example.com/a").is_ok());
        assert!(validate_url_for_open("http://news.example.com/a").is_ok());
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(matches!(
            validate_url_for_open("file:///etc/passwd"),
            Err(UrlValidationError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            validate_url_for_open("javascript:alert(1)"),
            Err(UrlValidationError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_rejects_relative_and_empty() {
        assert!(validate_url_for_open("/relative/path").is_err());
        assert!(validate_url_for_open("").is_err());
    }

    #[test]
    fn test_image_url_trimmed() {
        let url = validate_image_url("  https://img.example.com/x.jpg ").unwrap();
        assert_eq!(url.host_str(), Some("img.example.com"));
    }
}

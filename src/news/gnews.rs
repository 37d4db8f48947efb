use super::types::{Article, SearchResponse};
use futures::StreamExt;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Default GNews search endpoint.
pub const DEFAULT_BASE_URL: &str = "https://gnews.io/api/v4/search";

const MAX_RESPONSE_SIZE: usize = 2 * 1024 * 1024; // 2MB

/// Errors from a single search request.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, TLS, body read).
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
    /// The client-level timeout elapsed.
    #[error("Request timed out")]
    Timeout,
    /// Non-2xx response.
    #[error("API error: status {0}")]
    HttpStatus(u16),
    /// Body was not the expected JSON shape.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    #[error("Invalid endpoint URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("Insecure endpoint URL: HTTPS required (except localhost for testing)")]
    InsecureBaseUrl,
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Network(err)
        }
    }
}

/// Client for the news search endpoint.
///
/// Holds the shared `reqwest::Client` (timeouts and pooling live there), the
/// validated endpoint, the API key and the result language.
pub struct NewsClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: SecretString,
    language: String,
}

impl std::fmt::Debug for NewsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[REDACTED]")
            .field("language", &self.language)
            .finish()
    }
}

impl NewsClient {
    /// Build a client for `base_url`.
    ///
    /// The endpoint must be HTTPS so the key never travels in clear text;
    /// plain HTTP is accepted only for localhost test servers.
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        api_key: SecretString,
        language: impl Into<String>,
    ) -> Result<Self, FetchError> {
        let parsed = Url::parse(base_url)?;
        match parsed.scheme() {
            "https" => {}
            "http" if is_localhost(&parsed) => {
                tracing::warn!(base_url = %parsed, "Using non-HTTPS news endpoint (localhost only)");
            }
            _ => {
                tracing::error!(base_url = %parsed, "Rejecting non-HTTPS news endpoint");
                return Err(FetchError::InsecureBaseUrl);
            }
        }

        Ok(Self {
            http,
            base_url: parsed,
            api_key,
            language: language.into(),
        })
    }

    /// Search for up to `max` articles matching `query`.
    ///
    /// `page` is 1-based; only pages after the first send a `page` parameter.
    /// A body without an `articles` field yields an empty list.
    pub async fn search(
        &self,
        query: &str,
        max: usize,
        page: u32,
    ) -> Result<Vec<Article>, FetchError> {
        let url = self.search_url(query, max, page);
        tracing::debug!(query, max, page, "Fetching news");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), query, page, "News API returned error status");
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = read_limited(response, MAX_RESPONSE_SIZE).await?;
        let parsed: SearchResponse = serde_json::from_slice(&body)?;
        let articles = parsed.articles.unwrap_or_default();

        tracing::debug!(
            query,
            page,
            count = articles.len(),
            total = ?parsed.total_articles,
            "News fetched"
        );
        Ok(articles)
    }

    fn search_url(&self, query: &str, max: usize, page: u32) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("q", query)
                .append_pair("lang", &self.language)
                .append_pair("max", &max.to_string());
            if page > 1 {
                pairs.append_pair("page", &page.to_string());
            }
            pairs.append_pair("apikey", self.api_key.expose_secret());
        }
        url
    }
}

fn is_localhost(url: &Url) -> bool {
    matches!(url.host_str(), Some("localhost") | Some("127.0.0.1"))
}

async fn read_limited(response: reqwest::Response, limit: usize) -> Result<Vec<u8>, FetchError> {
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

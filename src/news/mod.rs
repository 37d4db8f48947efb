//! News search API client.
//!
//! Wraps the GNews v4 `search` endpoint: one GET per page, JSON body with
//! an `articles` array. No retry or backoff; failures surface to the caller.

mod gnews;
mod types;

pub use gnews::{FetchError, NewsClient, DEFAULT_BASE_URL};
pub use types::{Article, SearchResponse, Source};

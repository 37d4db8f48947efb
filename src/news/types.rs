use serde::{Deserialize, Deserializer};

/// Publisher attribution attached to an article.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// A single article as returned by the search API.
///
/// Shape is dictated by the remote service. Every field defaults so a
/// partially-populated entry still deserializes; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Article {
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    /// RFC 3339 timestamp, kept raw and parsed at display time.
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub source: Option<Source>,
    #[serde(deserialize_with = "null_as_empty")]
    pub url: String,
}

/// Accept `null` where a string is expected.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Article {
    /// Source name, if the API supplied a non-empty one.
    pub fn source_name(&self) -> Option<&str> {
        self.source
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .filter(|name| !name.trim().is_empty())
    }
}

/// Top-level search response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "totalArticles", default)]
    pub total_articles: Option<u64>,
    /// Absent on some error-shaped bodies; treated as no results.
    #[serde(default)]
    pub articles: Option<Vec<Article>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_article() {
        let json = r#"{
            "title": "Monsoon arrives early",
            "description": "Rains reach the coast.",
            "content": "ignored field",
            "url": "https://news.example.com/monsoon",
            "image": "https://img.example.com/m.jpg",
            "publishedAt": "2025-12-10T08:30:00Z",
            "source": { "name": "Example Times", "url": "https://news.example.com" }
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.title, "Monsoon arrives early");
        assert_eq!(article.source_name(), Some("Example Times"));
        assert_eq!(article.published_at.as_deref(), Some("2025-12-10T08:30:00Z"));
    }

    #[test]
    fn test_missing_fields_default() {
        let article: Article = serde_json::from_str(r#"{"title": "Bare"}"#).unwrap();
        assert_eq!(article.title, "Bare");
        assert!(article.description.is_none());
        assert!(article.image.is_none());
        assert!(article.source_name().is_none());
        assert!(article.url.is_empty());
    }

    #[test]
    fn test_null_title_and_url_do_not_fail_the_page() {
        let json = r#"{
            "totalArticles": 2,
            "articles": [
                { "title": "Fine", "url": "https://news.example.com/fine" },
                { "title": null, "url": null, "source": null }
            ]
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        let articles = response.articles.unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "Fine");
        assert!(articles[1].title.is_empty());
        assert!(articles[1].url.is_empty());
        assert!(articles[1].source_name().is_none());
    }

    #[test]
    fn test_blank_source_name_is_none() {
        let article = Article {
            source: Some(Source {
                name: Some("   ".to_string()),
                url: None,
            }),
            ..Default::default()
        };
        assert!(article.source_name().is_none());
    }

    #[test]
    fn test_response_without_articles_field() {
        let resp: SearchResponse = serde_json::from_str(r#"{"totalArticles": 0}"#).unwrap();
        assert!(resp.articles.is_none());
        assert_eq!(resp.total_articles, Some(0));
    }
}

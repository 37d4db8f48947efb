//! View models for the article list.
//!
//! Cards are shaped here, once per article, and the render layer only lays
//! them out. [`CardList::apply`] is the observer step run after every
//! completed load: it mirrors the state's article sequence into cards,
//! building only what is new so that existing cards keep their identity.

use crate::news::Article;
use crate::state::Completion;
use crate::util::{strip_control_chars, truncate_to_width, validate_image_url};
use chrono::{DateTime, Local, TimeZone};

pub const UNKNOWN_SOURCE: &str = "Unknown Source";
pub const NO_DESCRIPTION: &str = "No description available.";
pub const UNKNOWN_DATE: &str = "Unknown date";

/// Formatting knobs for cards.
#[derive(Debug, Clone, Copy)]
pub struct CardOptions {
    /// Maximum excerpt width in columns, ellipsis included.
    pub excerpt_length: usize,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            excerpt_length: 200,
        }
    }
}

/// Article image slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Thumbnail {
    /// A usable image URL; the host is shown in place of the picture.
    Image { host: String },
    /// Missing or unusable image.
    Placeholder,
}

impl Thumbnail {
    fn from_article(article: &Article) -> Self {
        article
            .image
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .and_then(|raw| validate_image_url(raw).ok())
            .and_then(|url| url.host_str().map(str::to_string))
            .map(|host| Thumbnail::Image { host })
            .unwrap_or(Thumbnail::Placeholder)
    }
}

/// Display-ready article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleCard {
    /// Stable for the card's lifetime; never reused within a [`CardList`].
    pub id: u64,
    pub title: String,
    /// `short by <source> / <time> on <date>`
    pub meta: String,
    pub excerpt: String,
    /// `read more at <source>`
    pub link_label: String,
    pub url: String,
    pub thumbnail: Thumbnail,
}

impl ArticleCard {
    pub fn from_article(article: &Article, id: u64, options: &CardOptions) -> Self {
        Self::from_article_in(article, id, options, &Local)
    }

    /// Like [`ArticleCard::from_article`] with timestamps shown in `tz`.
    pub fn from_article_in<Tz>(article: &Article, id: u64, options: &CardOptions, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let source = article
            .source_name()
            .map(|s| strip_control_chars(s).into_owned())
            .unwrap_or_else(|| UNKNOWN_SOURCE.to_string());

        let published = article
            .published_at
            .as_deref()
            .map(|raw| format_published(raw, tz))
            .unwrap_or_else(|| UNKNOWN_DATE.to_string());

        let description = article
            .description
            .as_deref()
            .map(strip_control_chars)
            .filter(|d| !d.trim().is_empty());
        let excerpt = match description {
            Some(d) => truncate_to_width(d.trim(), options.excerpt_length).into_owned(),
            None => NO_DESCRIPTION.to_string(),
        };

        Self {
            id,
            title: strip_control_chars(&article.title).trim().to_string(),
            meta: format!("short by {} / {}", source, published),
            excerpt,
            link_label: format!("read more at {}", source),
            url: article.url.clone(),
            thumbnail: Thumbnail::from_article(article),
        }
    }
}

/// `08:30 AM on Wednesday, Dec 10, 2025`, or [`UNKNOWN_DATE`].
pub fn format_published<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(dt) => {
            let local = dt.with_timezone(tz);
            format!(
                "{} on {}",
                local.format("%I:%M %p"),
                local.format("%A, %b %-d, %Y")
            )
        }
        Err(e) => {
            tracing::debug!(raw, error = %e, "Unparseable publish timestamp");
            UNKNOWN_DATE.to_string()
        }
    }
}

/// The rendered card set.
#[derive(Debug, Default)]
pub struct CardList {
    cards: Vec<ArticleCard>,
    next_id: u64,
}

impl CardList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every card, e.g. when a full reload starts.
    pub fn reset(&mut self) {
        self.cards.clear();
    }

    /// Mirror a completed load into cards.
    ///
    /// `articles` is the state's article sequence after the completion was
    /// applied. Appends only build `articles[start..end]`.
    pub fn apply(&mut self, completion: &Completion, articles: &[Article], options: &CardOptions) {
        match completion {
            Completion::Replaced { .. } => {
                self.cards.clear();
                self.push_cards(articles, options);
            }
            Completion::Appended { start, end } => {
                let slice = articles.get(*start..*end).unwrap_or_default();
                self.push_cards(slice, options);
            }
            Completion::Empty => self.cards.clear(),
            Completion::Failed {
                mode: crate::state::LoadMode::Replace,
                ..
            } => self.cards.clear(),
            Completion::Failed { .. } | Completion::Exhausted | Completion::Stale => {}
        }
        debug_assert!(self.cards.len() <= articles.len());
    }

    fn push_cards(&mut self, articles: &[Article], options: &CardOptions) {
        self.cards.reserve(articles.len());
        for article in articles {
            let id = self.next_id;
            self.next_id += 1;
            self.cards.push(ArticleCard::from_article(article, id, options));
        }
    }

    pub fn cards(&self) -> &[ArticleCard] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<&ArticleCard> {
        self.cards.get(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

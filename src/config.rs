//! Configuration file parser for ~/.config/headlines/config.toml.
//!
//! The config file is optional; a missing file yields `Config::default()`.
//! Unknown keys are ignored by serde, though we log a warning for each so
//! typos do not go unnoticed.
use crate::categories::{default_categories, Category};
use crate::news::DEFAULT_BASE_URL;
use secrecy::SecretString;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Environment variable consulted before `api_key` in the file.
pub const API_KEY_ENV: &str = "GNEWS_API_KEY";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// Every field has a default so any subset of keys can be given.
/// `Debug` masks `api_key`.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GNews API key (the `GNEWS_API_KEY` env var takes precedence).
    pub api_key: Option<String>,

    /// Search endpoint.
    pub base_url: String,

    /// Two-letter result language.
    pub language: String,

    /// Articles requested per load.
    pub page_size: usize,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Maximum excerpt width in columns.
    pub excerpt_length: usize,

    /// Category selected at startup.
    pub default_category: String,

    /// Sidebar categories, in display order.
    pub categories: Vec<Category>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            language: "en".to_string(),
            page_size: 10,
            request_timeout_secs: 30,
            excerpt_length: 200,
            default_category: "india".to_string(),
            categories: default_categories(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .field("page_size", &self.page_size)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("excerpt_length", &self.excerpt_length)
            .field("default_category", &self.default_category)
            .field("categories", &self.categories.len())
            .finish()
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Maximum articles per request accepted by the API.
    pub const MAX_PAGE_SIZE: usize = 100;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)`
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        let config = Self::from_toml(&content)?;
        tracing::info!(
            path = %path.display(),
            categories = config.categories.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = [
                "api_key",
                "base_url",
                "language",
                "page_size",
                "request_timeout_secs",
                "excerpt_length",
                "default_category",
                "categories",
            ];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.categories.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one category is required".to_string(),
            ));
        }
        if self.page_size == 0 || self.page_size > Self::MAX_PAGE_SIZE {
            return Err(ConfigError::Invalid(format!(
                "page_size must be between 1 and {}",
                Self::MAX_PAGE_SIZE
            )));
        }
        if let Some(cat) = self.categories.iter().find(|c| c.query.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "category '{}' has an empty query",
                cat.id
            )));
        }
        Ok(())
    }

    /// Resolve the API key: environment first, then the file.
    pub fn resolve_api_key(&self) -> Option<SecretString> {
        Self::pick_api_key(std::env::var(API_KEY_ENV).ok(), self.api_key.clone())
    }

    fn pick_api_key(env: Option<String>, file: Option<String>) -> Option<SecretString> {
        env.filter(|k| !k.trim().is_empty())
            .or_else(|| file.filter(|k| !k.trim().is_empty()))
            .map(|k| SecretString::from(k.trim().to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================

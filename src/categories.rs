//! News categories: named filters mapped to search queries.

use serde::Deserialize;

/// A named news filter shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    /// Stable identifier used on the command line and in config.
    pub id: String,
    /// Sidebar label.
    pub label: String,
    /// Query string sent to the search API.
    pub query: String,
}

impl Category {
    pub fn new(id: &str, label: &str, query: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            query: query.to_string(),
        }
    }
}

/// Built-in category set used when the config file does not define one.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("india", "India", "India news"),
        Category::new("world", "World", "world news"),
        Category::new("business", "Business", "business"),
        Category::new("technology", "Technology", "technology"),
        Category::new("entertainment", "Entertainment", "entertainment"),
        Category::new("sports", "Sports", "sports"),
        Category::new("science", "Science", "science"),
        Category::new("health", "Health", "health"),
    ]
}

/// Index of the category with `id`, if any.
pub fn position(categories: &[Category], id: &str) -> Option<usize> {
    categories.iter().position(|c| c.id.eq_ignore_ascii_case(id))
}

/// Resolve the starting category index.
///
/// Unknown ids fall back to the first category and log a warning.
pub fn resolve_initial(categories: &[Category], id: Option<&str>) -> usize {
    match id {
        Some(id) => position(categories, id).unwrap_or_else(|| {
            tracing::warn!(category = id, "Unknown category, falling back to first");
            0
        }),
        None => 0,
    }
}

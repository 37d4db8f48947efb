use crate::categories::{default_categories, Category};
use crate::news::{Article, FetchError, NewsClient};
use crate::state::{Completion, FeedState, FeedView, LoadMode, LoadMoreState, LoadTicket};
use crate::view::{ArticleCard, CardList, CardOptions};
use std::borrow::Cow;
use std::sync::Arc;
use tokio::time::Instant;

// ============================================================================
// HTTP Client Configuration
// ============================================================================

/// Build the shared HTTP client.
///
/// No retry policy lives here: a failed request is reported and the user
/// decides whether to retry.
pub fn build_http_client(timeout: std::time::Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .pool_max_idle_per_host(2)
        .pool_idle_timeout(std::time::Duration::from_secs(30))
        .tcp_keepalive(std::time::Duration::from_secs(60))
        .timeout(timeout)
        .user_agent(concat!("headlines/", env!("CARGO_PKG_VERSION")))
        .build()
}

// ============================================================================
// Sidebar
// ============================================================================

/// Category sidebar state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sidebar {
    pub open: bool,
    /// Highlighted row while open.
    pub cursor: usize,
}

/// Background task events.
pub enum AppEvent {
    /// A search request finished.
    ///
    /// Fields:
    /// - `ticket`: The ticket the load was started with
    /// - `result`: Articles or the fetch error
    NewsLoaded {
        ticket: LoadTicket,
        result: Result<Vec<Article>, FetchError>,
    },
    /// A background load task panicked.
    ///
    /// Carries the ticket so the in-flight request can still be settled.
    TaskPanicked {
        task: &'static str,
        ticket: LoadTicket,
        error: String,
    },
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state
pub struct App {
    pub client: Arc<NewsClient>,

    // Data
    pub feed: FeedState,
    pub cards: CardList,
    pub card_options: CardOptions,
    pub categories: Vec<Category>,
    pub active_category: usize,

    // UI State
    pub sidebar: Sidebar,
    /// Index into cards; `cards.len()` selects the load-more control.
    pub selected: usize,
    pub status_message: Option<(Cow<'static, str>, Instant)>,
    /// Dirty flag to skip unnecessary frame renders
    pub needs_redraw: bool,
    /// Current frame of the loading spinner animation.
    pub spinner_frame: usize,

    /// Handle to the in-flight load task, aborted when superseded.
    pub load_handle: Option<tokio::task::JoinHandle<()>>,
}

impl App {
    pub fn new(
        client: Arc<NewsClient>,
        categories: Vec<Category>,
        initial_category: usize,
        page_size: usize,
        card_options: CardOptions,
    ) -> Self {
        let categories = if categories.is_empty() {
            default_categories()
        } else {
            categories
        };
        let active_category = initial_category.min(categories.len() - 1);
        let start = &categories[active_category];
        let feed = FeedState::new(start.id.clone(), start.query.clone(), page_size);

        Self {
            client,
            feed,
            cards: CardList::new(),
            card_options,
            categories,
            active_category,
            sidebar: Sidebar {
                open: false,
                cursor: active_category,
            },
            selected: 0,
            status_message: None,
            needs_redraw: true,
            spinner_frame: 0,
            load_handle: None,
        }
    }

    pub fn active_category(&self) -> &Category {
        &self.categories[self.active_category]
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Start a load in `mode`, honoring the single-flight guard.
    pub fn request_load(&mut self, mode: LoadMode) -> Option<LoadTicket> {
        let ticket = self.feed.begin(mode)?;
        if mode == LoadMode::Replace {
            self.cards.reset();
            self.selected = 0;
        }
        self.needs_redraw = true;
        Some(ticket)
    }

    /// Press the load-more control. Only acts while it is shown and idle.
    pub fn load_more(&mut self) -> Option<LoadTicket> {
        match self.feed.load_more() {
            LoadMoreState::Ready | LoadMoreState::Failed => self.request_load(LoadMode::Append),
            LoadMoreState::Hidden | LoadMoreState::Loading => None,
        }
    }

    /// Re-issue a full reload of the current query.
    pub fn retry(&mut self) -> Option<LoadTicket> {
        self.request_load(LoadMode::Replace)
    }

    /// Route a finished request into state, then cards.
    pub fn apply_news<E: std::fmt::Display>(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Article>, E>,
    ) -> Completion {
        let completion = self.feed.complete(&ticket, result);
        if completion == Completion::Stale {
            return completion;
        }
        self.load_handle = None;
        self.cards
            .apply(&completion, self.feed.articles(), &self.card_options);

        match &completion {
            Completion::Appended { start, end } => {
                self.set_status(format!("Loaded {} more", end - start));
            }
            Completion::Exhausted => self.set_status("No more articles"),
            Completion::Failed {
                mode: LoadMode::Append,
                message,
            } => self.set_status(format!("Load more failed: {}", message)),
            _ => {}
        }

        self.clamp_selection();
        self.needs_redraw = true;
        completion
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Toggle the sidebar (the hamburger button).
    pub fn toggle_sidebar(&mut self) {
        self.sidebar.open = !self.sidebar.open;
        if self.sidebar.open {
            self.sidebar.cursor = self.active_category;
        }
        self.needs_redraw = true;
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar.open = false;
        self.needs_redraw = true;
    }

    /// Escape closes the sidebar when it is open. Returns whether it did.
    pub fn handle_escape(&mut self) -> bool {
        if self.sidebar.open {
            self.close_sidebar();
            true
        } else {
            false
        }
    }

    pub fn sidebar_up(&mut self) {
        self.sidebar.cursor = self.sidebar.cursor.saturating_sub(1);
    }

    pub fn sidebar_down(&mut self) {
        let max = self.categories.len().saturating_sub(1);
        self.sidebar.cursor = self.sidebar.cursor.saturating_add(1).min(max);
    }

    /// Activate a category: mark it, reset pagination, reload, close the sidebar.
    pub fn select_category(&mut self, index: usize) -> Option<LoadTicket> {
        let category = self.categories.get(index)?.clone();
        tracing::info!(category = %category.id, query = %category.query, "Switching category");

        if let Some(handle) = self.load_handle.take() {
            handle.abort();
            tracing::debug!("Aborted in-flight load for category switch");
        }

        self.active_category = index;
        self.sidebar.cursor = index;
        let ticket = self.feed.switch_category(category.id, category.query);
        self.cards.reset();
        self.selected = 0;
        self.close_sidebar();
        Some(ticket)
    }

    /// Number of selectable rows: cards plus the load-more control when shown.
    fn selectable_len(&self) -> usize {
        self.cards.len() + usize::from(self.show_load_more())
    }

    pub fn nav_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn nav_down(&mut self) {
        let len = self.selectable_len();
        if len > 0 {
            self.selected = self.selected.saturating_add(1).min(len - 1);
        }
    }

    pub fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.selectable_len().saturating_sub(1));
    }

    /// Whether the load-more control is part of the list.
    pub fn show_load_more(&self) -> bool {
        self.feed.view() == FeedView::Articles && self.feed.load_more().is_visible()
    }

    pub fn is_load_more_selected(&self) -> bool {
        self.show_load_more() && self.selected == self.cards.len()
    }

    pub fn selected_card(&self) -> Option<&ArticleCard> {
        self.cards.get(self.selected)
    }

    // ------------------------------------------------------------------
    // Status bar
    // ------------------------------------------------------------------

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if expired. Returns true if one was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    /// Whether anything is currently loading (drives the spinner).
    pub fn is_busy(&self) -> bool {
        self.feed.is_loading()
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(handle) = self.load_handle.take() {
            handle.abort();
            tracing::debug!("Aborted load task on App drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::DEFAULT_BASE_URL;
    use secrecy::SecretString;
    use tokio::time::{self, Duration};

    fn test_app() -> App {
        let client = NewsClient::new(
            reqwest::Client::new(),
            DEFAULT_BASE_URL,
            SecretString::from("test-key".to_string()),
            "en",
        )
        .unwrap();
        App::new(
            Arc::new(client),
            default_categories(),
            0,
            10,
            CardOptions::default(),
        )
    }

    fn articles(n: usize) -> Vec<Article> {
        (0..n)
            .map(|i| Article {
                title: format!("Story {}", i),
                url: format!("https://news.example.com/{}", i),
                ..Default::default()
            })
            .collect()
    }

    fn fetched(articles: Vec<Article>) -> Result<Vec<Article>, FetchError> {
        Ok(articles)
    }

    fn loaded_app(n: usize) -> App {
        let mut app = test_app();
        let ticket = app.request_load(LoadMode::Replace).unwrap();
        app.apply_news(ticket, fetched(articles(n)));
        app
    }

    #[tokio::test]
    async fn test_initial_category_is_first() {
        let app = test_app();
        assert_eq!(app.active_category().id, "india");
        assert_eq!(app.feed.query(), "India news");
    }

    #[tokio::test]
    async fn test_out_of_range_initial_category_clamped() {
        let client = test_app().client.clone();
        let app = App::new(client, default_categories(), 99, 10, CardOptions::default());
        assert_eq!(app.active_category, app.categories.len() - 1);
    }

    #[tokio::test]
    async fn test_full_reload_renders_n_cards() {
        let app = loaded_app(6);
        assert_eq!(app.feed.articles().len(), 6);
        assert_eq!(app.cards.len(), 6);
        assert!(app.show_load_more());
    }

    #[tokio::test]
    async fn test_load_more_appends_and_keeps_cards() {
        let mut app = loaded_app(10);
        let before: Vec<u64> = app.cards.cards().iter().map(|c| c.id).collect();

        let ticket = app.load_more().unwrap();
        assert_eq!(ticket.page, 2);
        // A second press while loading does nothing.
        assert!(app.load_more().is_none());

        app.apply_news(ticket, fetched(articles(5)));
        assert_eq!(app.cards.len(), 15);
        let after: Vec<u64> = app.cards.cards()[..10].iter().map(|c| c.id).collect();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_empty_reload_hides_load_more() {
        let app = loaded_app(0);
        assert_eq!(app.feed.view(), FeedView::Empty);
        assert!(!app.show_load_more());
        assert!(app.cards.is_empty());
    }

    #[tokio::test]
    async fn test_failed_reload_then_retry_same_query() {
        let mut app = test_app();
        let ticket = app.request_load(LoadMode::Replace).unwrap();
        app.apply_news(ticket.clone(), Err(FetchError::HttpStatus(500)));
        assert_eq!(app.feed.view(), FeedView::Error);

        let retry = app.retry().unwrap();
        assert_eq!(retry.query, ticket.query);
        assert_eq!(retry.mode, LoadMode::Replace);
    }

    #[tokio::test]
    async fn test_failed_load_more_sets_status_and_keeps_cards() {
        let mut app = loaded_app(4);
        let ticket = app.load_more().unwrap();
        app.apply_news(ticket, Err(FetchError::Timeout));
        assert_eq!(app.cards.len(), 4);
        assert_eq!(app.feed.load_more(), LoadMoreState::Failed);
        assert!(app.status_message.is_some());
        // Control stays pressable for a retry.
        assert!(app.load_more().is_some());
    }

    #[tokio::test]
    async fn test_toggle_and_escape_sidebar() {
        let mut app = test_app();
        assert!(!app.handle_escape());

        app.toggle_sidebar();
        assert!(app.sidebar.open);
        assert!(app.handle_escape());
        assert!(!app.sidebar.open);

        app.toggle_sidebar();
        app.toggle_sidebar();
        assert!(!app.sidebar.open);
    }

    #[tokio::test]
    async fn test_sidebar_cursor_bounds() {
        let mut app = test_app();
        app.toggle_sidebar();
        app.sidebar_up();
        assert_eq!(app.sidebar.cursor, 0);
        for _ in 0..50 {
            app.sidebar_down();
        }
        assert_eq!(app.sidebar.cursor, app.categories.len() - 1);
    }

    #[tokio::test]
    async fn test_select_category_resets_and_closes() {
        let mut app = loaded_app(10);
        let t = app.load_more().unwrap();
        app.apply_news(t, fetched(articles(10)));
        app.selected = 12;
        app.toggle_sidebar();

        let ticket = app.select_category(3).unwrap();
        assert_eq!(app.active_category, 3);
        assert_eq!(ticket.query, app.categories[3].query);
        assert_eq!(ticket.page, 1);
        assert_eq!(app.feed.displayed(), 0);
        assert!(app.cards.is_empty());
        assert_eq!(app.selected, 0);
        assert!(!app.sidebar.open);
    }

    #[tokio::test]
    async fn test_select_category_aborts_previous_task() {
        let mut app = test_app();
        let _ticket = app.request_load(LoadMode::Replace).unwrap();
        let (alive_tx, alive_rx) = tokio::sync::oneshot::channel::<()>();
        app.load_handle = Some(tokio::spawn(async move {
            let _alive = alive_tx;
            std::future::pending::<()>().await;
        }));

        app.select_category(1).unwrap();
        assert!(app.load_handle.is_none());

        // The sender is dropped only when the aborted task is torn down.
        let outcome = time::timeout(Duration::from_secs(1), alive_rx).await;
        assert!(matches!(outcome, Ok(Err(_))));
    }

    #[tokio::test]
    async fn test_select_category_out_of_range() {
        let mut app = test_app();
        assert!(app.select_category(100).is_none());
    }

    #[tokio::test]
    async fn test_stale_response_after_switch_is_dropped() {
        let mut app = loaded_app(10);
        let old = app.load_more().unwrap();
        let new = app.select_category(1).unwrap();

        assert_eq!(app.apply_news(old, fetched(articles(10))), Completion::Stale);
        assert!(app.cards.is_empty());

        app.apply_news(new, fetched(articles(2)));
        assert_eq!(app.cards.len(), 2);
    }

    #[tokio::test]
    async fn test_nav_reaches_load_more_control() {
        let mut app = loaded_app(2);
        app.nav_down();
        app.nav_down();
        app.nav_down();
        assert_eq!(app.selected, 2);
        assert!(app.is_load_more_selected());
        assert!(app.selected_card().is_none());
        app.nav_up();
        assert_eq!(app.selected_card().unwrap().title, "Story 1");
    }

    #[tokio::test]
    async fn test_status_expires_after_3_seconds() {
        let mut app = test_app();
        time::pause();
        app.set_status("Test message");

        time::advance(Duration::from_secs(2)).await;
        app.clear_expired_status();
        assert!(app.status_message.is_some());

        time::advance(Duration::from_secs(2)).await;
        assert!(app.clear_expired_status());
        assert!(app.status_message.is_none());
    }
}

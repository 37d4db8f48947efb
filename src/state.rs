//! Article list state and the pagination controller.
//!
//! `FeedState` owns everything a load needs to decide what to do: the active
//! category and query, the accumulated articles, how many have been rendered,
//! and which request (if any) is outstanding. All transitions are synchronous;
//! the network call happens elsewhere and comes back through [`FeedState::complete`].
//!
//! Requests are identified by a generation token. Only the token currently
//! in flight may complete; anything else is stale and ignored. A category
//! switch bumps the generation without waiting, so a slow response for the
//! previous category can never overwrite the new one.

use crate::news::Article;

/// Whether a load discards or extends the current articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Full reload: clear, then replace with a fresh first page.
    Replace,
    /// Load more: append the next page.
    Append,
}

/// Handle for one outstanding request.
///
/// Returned by [`FeedState::begin`] and handed back to [`FeedState::complete`]
/// together with the fetch result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub token: u64,
    pub mode: LoadMode,
    pub query: String,
    /// 1-based page cursor forwarded to the API.
    pub page: u32,
    pub max: usize,
}

/// Which full-container view the article area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedView {
    Loading,
    Articles,
    Empty,
    Error,
}

/// State of the "load more" control under the article list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMoreState {
    Hidden,
    Ready,
    Loading,
    Failed,
}

impl LoadMoreState {
    pub fn is_visible(self) -> bool {
        self != LoadMoreState::Hidden
    }

    pub fn label(self) -> &'static str {
        match self {
            LoadMoreState::Hidden | LoadMoreState::Ready => "Load More",
            LoadMoreState::Loading => "Loading...",
            LoadMoreState::Failed => "Failed to load. Retry?",
        }
    }
}

/// What a completed request did to the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Token did not match the in-flight request; nothing changed.
    Stale,
    /// Full reload succeeded with `count` articles.
    Replaced { count: usize },
    /// Load more appended `articles[start..end]`.
    Appended { start: usize, end: usize },
    /// Full reload returned nothing.
    Empty,
    /// Load more returned nothing; the control is hidden.
    Exhausted,
    /// The request failed.
    Failed { mode: LoadMode, message: String },
}

pub struct FeedState {
    category: String,
    query: String,
    articles: Vec<Article>,
    displayed: usize,
    page_size: usize,
    next_page: u32,
    generation: u64,
    in_flight: Option<u64>,
    has_error: bool,
    initial_load: bool,
    view: FeedView,
    load_more: LoadMoreState,
    last_error: Option<String>,
}

impl FeedState {
    pub fn new(category: impl Into<String>, query: impl Into<String>, page_size: usize) -> Self {
        Self {
            category: category.into(),
            query: query.into(),
            articles: Vec::new(),
            displayed: 0,
            page_size: page_size.max(1),
            next_page: 1,
            generation: 0,
            in_flight: None,
            has_error: false,
            initial_load: true,
            view: FeedView::Loading,
            load_more: LoadMoreState::Hidden,
            last_error: None,
        }
    }

    /// Start a load unless one is already outstanding.
    ///
    /// Returns `None` when a request is in flight, or for `Append` when there
    /// is nothing to append to.
    pub fn begin(&mut self, mode: LoadMode) -> Option<LoadTicket> {
        if let Some(token) = self.in_flight {
            tracing::debug!(token, ?mode, "Load already in flight, ignoring");
            return None;
        }
        if mode == LoadMode::Append && self.articles.is_empty() {
            tracing::debug!("Nothing to append to, ignoring load more");
            return None;
        }
        Some(self.start(mode))
    }

    /// Re-issue a full reload of the current query.
    pub fn retry(&mut self) -> Option<LoadTicket> {
        self.begin(LoadMode::Replace)
    }

    /// Switch to a new category and reload from its first page.
    ///
    /// Supersedes any outstanding request: its eventual completion will be
    /// reported as [`Completion::Stale`].
    pub fn switch_category(
        &mut self,
        category: impl Into<String>,
        query: impl Into<String>,
    ) -> LoadTicket {
        if let Some(token) = self.in_flight.take() {
            tracing::debug!(token, "Superseding in-flight load for category switch");
        }
        self.category = category.into();
        self.query = query.into();
        self.initial_load = false;
        self.start(LoadMode::Replace)
    }

    fn start(&mut self, mode: LoadMode) -> LoadTicket {
        self.generation = self.generation.wrapping_add(1);
        let token = self.generation;
        self.in_flight = Some(token);
        self.has_error = false;

        let page = match mode {
            LoadMode::Replace => {
                self.articles.clear();
                self.displayed = 0;
                self.next_page = 1;
                self.view = FeedView::Loading;
                self.load_more = LoadMoreState::Hidden;
                self.last_error = None;
                1
            }
            LoadMode::Append => {
                self.load_more = LoadMoreState::Loading;
                self.next_page
            }
        };

        tracing::debug!(token, ?mode, page, query = %self.query, "Starting load");
        LoadTicket {
            token,
            mode,
            query: self.query.clone(),
            page,
            max: self.page_size,
        }
    }

    /// Apply the result of the request identified by `ticket`.
    pub fn complete<E: std::fmt::Display>(
        &mut self,
        ticket: &LoadTicket,
        result: Result<Vec<Article>, E>,
    ) -> Completion {
        if self.in_flight != Some(ticket.token) {
            tracing::debug!(
                expected = ?self.in_flight,
                got = ticket.token,
                "Ignoring stale load result"
            );
            return Completion::Stale;
        }
        self.in_flight = None;
        self.initial_load = false;

        let completion = match (ticket.mode, result) {
            (LoadMode::Replace, Ok(articles)) if articles.is_empty() => {
                self.articles.clear();
                self.displayed = 0;
                self.view = FeedView::Empty;
                self.load_more = LoadMoreState::Hidden;
                Completion::Empty
            }
            (LoadMode::Replace, Ok(articles)) => {
                let count = articles.len();
                self.articles = articles;
                self.displayed = count;
                self.next_page = ticket.page.saturating_add(1);
                self.view = FeedView::Articles;
                self.load_more = LoadMoreState::Ready;
                Completion::Replaced { count }
            }
            (LoadMode::Append, Ok(articles)) if articles.is_empty() => {
                self.load_more = LoadMoreState::Hidden;
                Completion::Exhausted
            }
            (LoadMode::Append, Ok(articles)) => {
                let start = self.displayed;
                self.articles.extend(articles);
                self.displayed = self.articles.len();
                self.next_page = ticket.page.saturating_add(1);
                self.load_more = LoadMoreState::Ready;
                Completion::Appended {
                    start,
                    end: self.displayed,
                }
            }
            (mode, Err(e)) => {
                let message = e.to_string();
                tracing::error!(?mode, query = %ticket.query, error = %message, "Error fetching news");
                self.has_error = true;
                self.last_error = Some(message.clone());
                match mode {
                    LoadMode::Replace => {
                        self.view = FeedView::Error;
                        self.load_more = LoadMoreState::Hidden;
                    }
                    LoadMode::Append => {
                        self.load_more = LoadMoreState::Failed;
                    }
                }
                Completion::Failed { mode, message }
            }
        };

        debug_assert!(self.displayed <= self.articles.len());
        completion
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn displayed(&self) -> usize {
        self.displayed
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn view(&self) -> FeedView {
        self.view
    }

    pub fn load_more(&self) -> LoadMoreState {
        self.load_more
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn has_error(&self) -> bool {
        self.has_error
    }

    pub fn is_initial_load(&self) -> bool {
        self.initial_load
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn article(n: usize) -> Article {
        Article {
            title: format!("Story {}", n),
            url: format!("https://news.example.com/{}", n),
            ..Default::default()
        }
    }

    fn batch(range: std::ops::Range<usize>) -> Vec<Article> {
        range.map(article).collect()
    }

    fn ok(articles: Vec<Article>) -> Result<Vec<Article>, String> {
        Ok(articles)
    }

    fn err() -> Result<Vec<Article>, String> {
        Err("connection refused".to_string())
    }

    fn loaded(n: usize) -> FeedState {
        let mut state = FeedState::new("india", "India news", 10);
        let ticket = state.begin(LoadMode::Replace).unwrap();
        state.complete(&ticket, ok(batch(0..n)));
        state
    }

    #[test]
    fn test_new_state_is_initial_and_idle() {
        let state = FeedState::new("india", "India news", 10);
        assert!(state.is_initial_load());
        assert!(!state.is_loading());
        assert_eq!(state.displayed(), 0);
        assert_eq!(state.load_more(), LoadMoreState::Hidden);
    }

    #[test]
    fn test_replace_holds_exactly_n() {
        let state = loaded(7);
        assert_eq!(state.articles().len(), 7);
        assert_eq!(state.displayed(), 7);
        assert_eq!(state.view(), FeedView::Articles);
        assert_eq!(state.load_more(), LoadMoreState::Ready);
        assert!(!state.is_initial_load());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_replace_ticket_targets_first_page() {
        let mut state = FeedState::new("india", "India news", 10);
        let ticket = state.begin(LoadMode::Replace).unwrap();
        assert_eq!(ticket.page, 1);
        assert_eq!(ticket.max, 10);
        assert_eq!(ticket.query, "India news");
        assert_eq!(state.view(), FeedView::Loading);
    }

    #[test]
    fn test_append_adds_exactly_m() {
        let mut state = loaded(10);
        let ticket = state.begin(LoadMode::Append).unwrap();
        assert_eq!(ticket.page, 2);
        assert_eq!(state.load_more(), LoadMoreState::Loading);

        let completion = state.complete(&ticket, ok(batch(10..14)));
        assert_eq!(completion, Completion::Appended { start: 10, end: 14 });
        assert_eq!(state.articles().len(), 14);
        assert_eq!(state.displayed(), 14);
        assert_eq!(state.articles()[0].title, "Story 0");
    }

    #[test]
    fn test_append_advances_cursor() {
        let mut state = loaded(10);
        let t2 = state.begin(LoadMode::Append).unwrap();
        state.complete(&t2, ok(batch(10..20)));
        let t3 = state.begin(LoadMode::Append).unwrap();
        assert_eq!(t3.page, 3);
    }

    #[test]
    fn test_empty_replace_shows_empty_view() {
        let mut state = FeedState::new("india", "India news", 10);
        let ticket = state.begin(LoadMode::Replace).unwrap();
        let completion = state.complete(&ticket, ok(Vec::new()));
        assert_eq!(completion, Completion::Empty);
        assert_eq!(state.view(), FeedView::Empty);
        assert!(!state.load_more().is_visible());
    }

    #[test]
    fn test_failed_replace_shows_error_and_retry_reissues_query() {
        let mut state = FeedState::new("india", "India news", 10);
        let first = state.begin(LoadMode::Replace).unwrap();
        let completion = state.complete(&first, err());
        assert!(matches!(
            completion,
            Completion::Failed {
                mode: LoadMode::Replace,
                ..
            }
        ));
        assert_eq!(state.view(), FeedView::Error);
        assert!(state.has_error());
        assert!(!state.load_more().is_visible());
        assert_eq!(state.last_error(), Some("connection refused"));

        let retry = state.retry().unwrap();
        assert_eq!(retry.query, first.query);
        assert_eq!(retry.mode, LoadMode::Replace);
        assert_eq!(retry.page, first.page);
        assert_ne!(retry.token, first.token);
        assert!(!state.has_error());
    }

    #[test]
    fn test_failed_append_keeps_articles() {
        let mut state = loaded(10);
        let ticket = state.begin(LoadMode::Append).unwrap();
        state.complete(&ticket, err());
        assert_eq!(state.articles().len(), 10);
        assert_eq!(state.displayed(), 10);
        assert_eq!(state.view(), FeedView::Articles);
        assert_eq!(state.load_more(), LoadMoreState::Failed);
        assert_eq!(state.load_more().label(), "Failed to load. Retry?");

        // Pressing the control again retries the same page.
        let again = state.begin(LoadMode::Append).unwrap();
        assert_eq!(again.page, 2);
    }

    #[test]
    fn test_empty_append_hides_control() {
        let mut state = loaded(3);
        let ticket = state.begin(LoadMode::Append).unwrap();
        assert_eq!(state.complete(&ticket, ok(Vec::new())), Completion::Exhausted);
        assert_eq!(state.articles().len(), 3);
        assert_eq!(state.load_more(), LoadMoreState::Hidden);
    }

    #[test]
    fn test_second_begin_while_in_flight_is_noop() {
        let mut state = FeedState::new("india", "India news", 10);
        let first = state.begin(LoadMode::Replace).unwrap();
        assert!(state.begin(LoadMode::Replace).is_none());
        assert!(state.begin(LoadMode::Append).is_none());
        assert!(state.retry().is_none());

        state.complete(&first, ok(batch(0..5)));
        assert_eq!(state.articles().len(), 5);
        assert!(state.begin(LoadMode::Append).is_some());
    }

    #[test]
    fn test_append_without_articles_is_noop() {
        let mut state = FeedState::new("india", "India news", 10);
        assert!(state.begin(LoadMode::Append).is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_latch_released_on_every_outcome() {
        let mut state = loaded(2);
        assert!(!state.is_loading());

        let t = state.begin(LoadMode::Append).unwrap();
        state.complete(&t, err());
        assert!(!state.is_loading());

        let t = state.begin(LoadMode::Replace).unwrap();
        state.complete(&t, ok(Vec::new()));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_switch_category_resets_regardless_of_depth() {
        let mut state = loaded(10);
        for n in 1..4 {
            let t = state.begin(LoadMode::Append).unwrap();
            state.complete(&t, ok(batch(n * 10..n * 10 + 10)));
        }
        assert_eq!(state.displayed(), 40);

        let ticket = state.switch_category("sports", "sports");
        assert_eq!(state.displayed(), 0);
        assert!(state.articles().is_empty());
        assert_eq!(state.category(), "sports");
        assert_eq!(ticket.query, "sports");
        assert_eq!(ticket.mode, LoadMode::Replace);
        assert_eq!(ticket.page, 1);
        assert_eq!(state.view(), FeedView::Loading);
    }

    #[test]
    fn test_switch_category_discards_superseded_response() {
        let mut state = loaded(10);
        let pending_more = state.begin(LoadMode::Append).unwrap();
        let new_load = state.switch_category("world", "world news");

        // The old load-more arrives after the switch: ignored.
        assert_eq!(
            state.complete(&pending_more, ok(batch(10..20))),
            Completion::Stale
        );
        assert!(state.articles().is_empty());
        assert!(state.is_loading());

        assert_eq!(
            state.complete(&new_load, ok(batch(0..3))),
            Completion::Replaced { count: 3 }
        );
        assert_eq!(state.articles().len(), 3);
    }

    #[test]
    fn test_stale_completion_after_settle_is_ignored() {
        let mut state = FeedState::new("india", "India news", 10);
        let ticket = state.begin(LoadMode::Replace).unwrap();
        state.complete(&ticket, ok(batch(0..2)));
        assert_eq!(state.complete(&ticket, ok(batch(0..9))), Completion::Stale);
        assert_eq!(state.articles().len(), 2);
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let state = FeedState::new("india", "India news", 0);
        assert_eq!(state.page_size(), 1);
    }

    #[derive(Debug, Clone)]
    enum Step {
        Replace(usize),
        Append(usize),
        FailReplace,
        FailAppend,
        Switch(usize),
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            (0usize..15).prop_map(Step::Replace),
            (0usize..15).prop_map(Step::Append),
            Just(Step::FailReplace),
            Just(Step::FailAppend),
            (0usize..15).prop_map(Step::Switch),
        ]
    }

    proptest! {
        #[test]
        fn prop_displayed_never_exceeds_articles(steps in proptest::collection::vec(step(), 0..40)) {
            let mut state = FeedState::new("india", "India news", 10);
            for s in steps {
                match s {
                    Step::Replace(n) => {
                        if let Some(t) = state.begin(LoadMode::Replace) {
                            state.complete(&t, ok(batch(0..n)));
                        }
                    }
                    Step::Append(n) => {
                        let before = state.articles().len();
                        if let Some(t) = state.begin(LoadMode::Append) {
                            state.complete(&t, ok(batch(before..before + n)));
                            prop_assert_eq!(state.articles().len(), before + n);
                        }
                    }
                    Step::FailReplace => {
                        if let Some(t) = state.begin(LoadMode::Replace) {
                            state.complete(&t, err());
                        }
                    }
                    Step::FailAppend => {
                        let before = state.articles().len();
                        if let Some(t) = state.begin(LoadMode::Append) {
                            state.complete(&t, err());
                            prop_assert_eq!(state.articles().len(), before);
                        }
                    }
                    Step::Switch(n) => {
                        let t = state.switch_category("world", "world news");
                        state.complete(&t, ok(batch(0..n)));
                    }
                }
                prop_assert!(state.displayed() <= state.articles().len());
                prop_assert!(!state.is_loading());
            }
        }
    }
}

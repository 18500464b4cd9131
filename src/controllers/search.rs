//! Search controller: keystrokes in, de-duplicated in-order results out.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;

use crate::config::SearchConfig;
use crate::models::SearchState;
use crate::sources::{CatalogSource, DEFAULT_MAX_RESULTS};
use crate::utils::{Throttler, DEFAULT_THROTTLE_INTERVAL};

const SEARCH_FAILED: &str = "Search failed";

/// Drives catalog search from raw user input
///
/// Blank input clears everything at once. Non-blank input updates the visible
/// query right away and schedules a throttled search. Superseded searches still
/// finish their round trip, but their results or errors are dropped unless the
/// text they were issued for is still the latest intent.
///
/// Must be used from within a tokio runtime.
pub struct SearchController {
    inner: Arc<SearchInner>,
    throttler: Throttler<String>,
}

struct SearchInner {
    source: Arc<dyn CatalogSource>,
    max_results: usize,
    state: watch::Sender<SearchState>,
    /// Most recent text typed by the user
    latest_intent: Mutex<String>,
}

impl SearchController {
    /// Create with the default throttle interval and page size
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self::with_settings(source, DEFAULT_THROTTLE_INTERVAL, DEFAULT_MAX_RESULTS)
    }

    /// Create from search configuration
    pub fn from_config(source: Arc<dyn CatalogSource>, config: &SearchConfig) -> Self {
        Self::with_settings(source, config.throttle_interval(), config.max_results)
    }

    pub fn with_settings(
        source: Arc<dyn CatalogSource>,
        interval: Duration,
        max_results: usize,
    ) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        let inner = Arc::new(SearchInner {
            source,
            max_results,
            state,
            latest_intent: Mutex::new(String::new()),
        });

        let worker = Arc::clone(&inner);
        let throttler = Throttler::new(interval, move |query: String| {
            let inner = Arc::clone(&worker);
            async move { inner.run_search(query).await }
        });

        Self { inner, throttler }
    }

    /// Feed the current contents of the search field
    pub fn handle_query_change(&self, text: &str) {
        self.inner.set_latest_intent(text);

        if text.trim().is_empty() {
            self.clear_search();
            return;
        }

        self.inner.state.send_modify(|state| {
            state.query = text.to_string();
            state.error = None;
        });
        self.throttler.schedule(text.to_string());
    }

    /// Reset query, results, error and loading immediately
    pub fn clear_search(&self) {
        self.inner.set_latest_intent("");
        self.throttler.cancel_pending();
        self.inner.state.send_replace(SearchState::default());
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SearchState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.inner.state.subscribe()
    }
}

impl std::fmt::Debug for SearchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("source", &self.inner.source.id())
            .field("throttler", &self.throttler)
            .finish_non_exhaustive()
    }
}

impl SearchInner {
    fn set_latest_intent(&self, text: &str) {
        let mut latest = self.latest_intent.lock().unwrap_or_else(PoisonError::into_inner);
        latest.clear();
        latest.push_str(text);
    }

    fn latest_intent(&self) -> String {
        self.latest_intent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn run_search(&self, query: String) {
        if query.trim().is_empty() || self.latest_intent().trim().is_empty() {
            tracing::debug!(query = %query, "Search superseded by a clear - skipping");
            return;
        }

        self.state.send_modify(|state| state.is_loading = true);

        let result = self.source.search_catalog(&query, self.max_results).await;
        let is_latest = self.latest_intent() == query;

        if !is_latest {
            tracing::debug!(query = %query, "Discarding stale search response");
        }

        self.state.send_modify(|state| {
            if is_latest {
                match result {
                    Ok(books) => {
                        state.results = books;
                        state.error = None;
                    }
                    Err(e) => {
                        let message = e.to_string();
                        state.error = Some(if message.is_empty() {
                            SEARCH_FAILED.to_string()
                        } else {
                            message
                        });
                        state.results.clear();
                    }
                }
            }
            state.is_loading = false;
        });
    }
}

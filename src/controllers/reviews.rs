//! Critic reviews controller.

use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

use crate::models::ReviewsState;
use crate::sources::ReviewSource;

const LOAD_FAILED: &str = "Failed to load reviews";

/// One-shot loader for the reviews of a title
///
/// Each successful load replaces the review list wholesale.
pub struct ReviewsController {
    source: Arc<dyn ReviewSource>,
    state: watch::Sender<ReviewsState>,
    title: Mutex<Option<String>>,
}

impl ReviewsController {
    /// Create in the loading state, before any fetch has run
    pub fn new(source: Arc<dyn ReviewSource>) -> Self {
        let (state, _) = watch::channel(ReviewsState::default());
        Self {
            source,
            state,
            title: Mutex::new(None),
        }
    }

    /// Load reviews for `title` only if it differs from the last one requested
    pub async fn set_title(&self, title: Option<&str>) {
        let key = title.unwrap_or_default();
        let unchanged = self
            .title
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_deref()
            == Some(key);

        if !unchanged {
            self.load(title).await;
        }
    }

    /// Fetch reviews for `title`
    ///
    /// Without a title nothing is fetched: the list is emptied and loading ends.
    pub async fn load(&self, title: Option<&str>) {
        *self.title.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(title.unwrap_or_default().to_string());

        let Some(title) = title.filter(|t| !t.trim().is_empty()) else {
            self.state.send_modify(|state| {
                state.reviews.clear();
                state.is_loading = false;
            });
            return;
        };

        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });

        let result = self.source.search_reviews(Some(title)).await;

        self.state.send_modify(|state| {
            match result {
                Ok(reviews) => state.reviews = reviews,
                Err(e) => {
                    tracing::debug!(title, "Review search failed: {}", e);
                    let message = e.to_string();
                    state.error = Some(if message.is_empty() {
                        LOAD_FAILED.to_string()
                    } else {
                        message
                    });
                }
            }
            state.is_loading = false;
        });
    }

    /// Snapshot of the current state
    pub fn state(&self) -> ReviewsState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<ReviewsState> {
        self.state.subscribe()
    }
}

impl std::fmt::Debug for ReviewsController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewsController")
            .field("source", &self.source.id())
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::mock::{make_review, MockReviewSource};

    #[tokio::test]
    async fn test_missing_title_skips_fetch() {
        let mock = Arc::new(MockReviewSource::new());
        let controller = ReviewsController::new(mock.clone());
        assert!(controller.state().is_loading);

        controller.load(None).await;

        let state = controller.state();
        assert!(!state.is_loading);
        assert!(state.reviews.is_empty());
        assert!(state.error.is_none());
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_load_sets_reviews() {
        let mock = Arc::new(MockReviewSource::new());
        mock.set_reviews("Dune", vec![make_review(0, "a"), make_review(1, "b")]);
        let controller = ReviewsController::new(mock.clone());

        controller.load(Some("Dune")).await;

        let state = controller.state();
        assert_eq!(state.reviews.len(), 2);
        assert!(!state.is_loading);
        assert_eq!(mock.calls(), vec!["Dune"]);
    }

    #[tokio::test]
    async fn test_reload_replaces_list() {
        let mock = Arc::new(MockReviewSource::new());
        mock.set_reviews("Dune", vec![make_review(0, "a"), make_review(1, "b")]);
        mock.set_reviews("Emma", vec![make_review(0, "c")]);
        let controller = ReviewsController::new(mock.clone());

        controller.load(Some("Dune")).await;
        controller.load(Some("Emma")).await;

        let ids: Vec<_> = controller.state().reviews.into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["nyt-0-c"]);
    }

    #[tokio::test]
    async fn test_error_message() {
        let mock = Arc::new(MockReviewSource::new());
        mock.set_error("Dune", "Invalid ApiKey");
        let controller = ReviewsController::new(mock.clone());

        controller.load(Some("Dune")).await;

        let state = controller.state();
        assert_eq!(state.error.as_deref(), Some("Invalid ApiKey"));
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_set_title_only_refetches_on_change() {
        let mock = Arc::new(MockReviewSource::new());
        let controller = ReviewsController::new(mock.clone());

        controller.set_title(Some("Dune")).await;
        controller.set_title(Some("Dune")).await;
        controller.set_title(Some("Emma")).await;

        assert_eq!(mock.calls(), vec!["Dune", "Emma"]);
    }
}

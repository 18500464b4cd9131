//! Book details controller.

use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

use crate::models::BookDetailsState;
use crate::sources::CatalogSource;

const LOAD_FAILED: &str = "Failed to load book";

/// One-shot loader for a single book, keyed by id
pub struct BookDetailsController {
    source: Arc<dyn CatalogSource>,
    state: watch::Sender<BookDetailsState>,
    book_id: Mutex<Option<String>>,
}

impl BookDetailsController {
    /// Create in the loading state, before any fetch has run
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        let (state, _) = watch::channel(BookDetailsState::default());
        Self {
            source,
            state,
            book_id: Mutex::new(None),
        }
    }

    /// Load the book for `book_id` only if it differs from the last one requested
    pub async fn set_book_id(&self, book_id: &str) {
        let unchanged = self
            .book_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_deref()
            == Some(book_id);

        if !unchanged {
            self.load(book_id).await;
        }
    }

    /// Fetch the book, replacing the error or book in state
    pub async fn load(&self, book_id: &str) {
        *self.book_id.lock().unwrap_or_else(PoisonError::into_inner) = Some(book_id.to_string());

        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });

        let result = self.source.fetch_catalog_item(book_id).await;

        self.state.send_modify(|state| {
            match result {
                Ok(book) => state.book = Some(book),
                Err(e) => {
                    tracing::debug!(book_id, "Book details failed: {}", e);
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
    pub fn state(&self) -> BookDetailsState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<BookDetailsState> {
        self.state.subscribe()
    }
}

impl std::fmt::Debug for BookDetailsController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookDetailsController")
            .field("source", &self.source.id())
            .field("book_id", &self.book_id)
            .finish_non_exhaustive()
    }
}

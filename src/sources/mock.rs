//! Mock sources for testing purposes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::models::{Book, BookReview};
use crate::sources::{CatalogSource, ProviderError, ReviewSource};

/// A scripted reply: success value or API error message, after an optional delay
#[derive(Debug, Clone)]
struct Scripted<T> {
    reply: Result<T, String>,
    delay: Duration,
}

impl<T: Clone> Scripted<T> {
    async fn play(&self) -> Result<T, ProviderError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.reply.clone().map_err(|message| ProviderError::Api {
            status: 500,
            message,
        })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A mock catalog that returns predefined responses per query or id.
///
/// Unknown queries return an empty list; unknown ids return
/// [`ProviderError::NotFound`].
#[derive(Debug, Default)]
pub struct MockCatalogSource {
    searches: Mutex<HashMap<String, Scripted<Vec<Book>>>>,
    items: Mutex<HashMap<String, Scripted<Book>>>,
    search_calls: Mutex<Vec<String>>,
    fetch_calls: Mutex<Vec<String>>,
}

impl MockCatalogSource {
    /// Create a new mock catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the results for a query.
    pub fn set_search_results(&self, query: &str, books: Vec<Book>) {
        self.set_search_reply(query, Ok(books), Duration::ZERO);
    }

    /// Set the results for a query, delivered after `delay`.
    pub fn set_delayed_search_results(&self, query: &str, books: Vec<Book>, delay: Duration) {
        self.set_search_reply(query, Ok(books), delay);
    }

    /// Make a query fail with an API error.
    pub fn set_search_error(&self, query: &str, message: &str) {
        self.set_search_reply(query, Err(message.to_string()), Duration::ZERO);
    }

    /// Make a query fail with an API error after `delay`.
    pub fn set_delayed_search_error(&self, query: &str, message: &str, delay: Duration) {
        self.set_search_reply(query, Err(message.to_string()), delay);
    }

    fn set_search_reply(&self, query: &str, reply: Result<Vec<Book>, String>, delay: Duration) {
        lock(&self.searches).insert(query.to_string(), Scripted { reply, delay });
    }

    /// Make a book available for fetch-by-id.
    pub fn add_book(&self, book: Book) {
        self.add_delayed_book(book, Duration::ZERO);
    }

    /// Make a book available for fetch-by-id, delivered after `delay`.
    pub fn add_delayed_book(&self, book: Book, delay: Duration) {
        lock(&self.items).insert(
            book.id.clone(),
            Scripted {
                reply: Ok(book),
                delay,
            },
        );
    }

    /// Make a fetch-by-id fail with an API error.
    pub fn set_fetch_error(&self, id: &str, message: &str) {
        lock(&self.items).insert(
            id.to_string(),
            Scripted {
                reply: Err(message.to_string()),
                delay: Duration::ZERO,
            },
        );
    }

    /// Queries that reached the catalog, in call order.
    pub fn search_calls(&self) -> Vec<String> {
        lock(&self.search_calls).clone()
    }

    /// Ids that reached the catalog, in call order.
    pub fn fetch_calls(&self) -> Vec<String> {
        lock(&self.fetch_calls).clone()
    }
}

#[async_trait]
impl CatalogSource for MockCatalogSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Catalog"
    }

    async fn search_catalog(
        &self,
        query: &str,
        _max_results: usize,
    ) -> Result<Vec<Book>, ProviderError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        lock(&self.search_calls).push(query.to_string());
        let scripted = lock(&self.searches).get(query).cloned();
        match scripted {
            Some(scripted) => scripted.play().await,
            None => Ok(Vec::new()),
        }
    }

    async fn fetch_catalog_item(&self, id: &str) -> Result<Book, ProviderError> {
        lock(&self.fetch_calls).push(id.to_string());
        let scripted = lock(&self.items).get(id).cloned();
        match scripted {
            Some(scripted) => scripted.play().await,
            None => Err(ProviderError::NotFound),
        }
    }
}

/// A mock review source that returns predefined reviews per title.
#[derive(Debug, Default)]
pub struct MockReviewSource {
    reviews: Mutex<HashMap<String, Scripted<Vec<BookReview>>>>,
    calls: Mutex<Vec<String>>,
}

impl MockReviewSource {
    /// Create a new mock review source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reviews for a title.
    pub fn set_reviews(&self, title: &str, reviews: Vec<BookReview>) {
        lock(&self.reviews).insert(
            title.to_string(),
            Scripted {
                reply: Ok(reviews),
                delay: Duration::ZERO,
            },
        );
    }

    /// Make a title's review search fail with an API error.
    pub fn set_error(&self, title: &str, message: &str) {
        lock(&self.reviews).insert(
            title.to_string(),
            Scripted {
                reply: Err(message.to_string()),
                delay: Duration::ZERO,
            },
        );
    }

    /// Titles that reached the source, in call order.
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl ReviewSource for MockReviewSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Reviews"
    }

    async fn search_reviews(&self, title: Option<&str>) -> Result<Vec<BookReview>, ProviderError> {
        let Some(title) = title.filter(|t| !t.trim().is_empty()) else {
            return Ok(Vec::new());
        };

        lock(&self.calls).push(title.to_string());
        let scripted = lock(&self.reviews).get(title).cloned();
        match scripted {
            Some(scripted) => scripted.play().await,
            None => Ok(Vec::new()),
        }
    }
}

/// Helper function to create a mock book for testing.
pub fn make_book(id: &str, title: &str) -> Book {
    Book::new(id, title, vec![format!("Author of {}", title)])
}

/// Helper function to create a mock review for testing.
pub fn make_review(index: usize, article_id: &str) -> BookReview {
    BookReview {
        id: format!("nyt-{}-{}", index, article_id),
        source: crate::utils::NYTIMES_SOURCE_NAME.to_string(),
        author: "By Reviewer".to_string(),
        date: "2023-01-01".to_string(),
        summary: format!("Summary of {}", article_id),
        url: format!("https://nytimes.com/{}", article_id),
    }
}

//! Provider sources for catalog search and critic reviews.
//!
//! Two traits form the seam between the controllers and the network:
//!
//! - [`CatalogSource`]: search by free text and fetch by id ([`GoogleBooksSource`])
//! - [`ReviewSource`]: critic reviews for a title ([`NyTimesSource`])
//!
//! Every operation validates its input first. A blank query or an absent title
//! returns an empty list without touching the network. Provider payloads are
//! mapped through [`crate::utils::normalize_catalog_item`] and
//! [`crate::utils::normalize_review_article`].
//!
//! Each provider reports errors in its own JSON shape, so each source module owns
//! a single `error_message` extractor and hands it to [`api_error`]. When the
//! error body is missing or unparseable the message falls back to
//! `"<operation> with status <code>"`.

mod google_books;
mod nytimes;

pub mod mock;

pub use google_books::GoogleBooksSource;
pub use mock::{MockCatalogSource, MockReviewSource};
pub use nytimes::NyTimesSource;

use crate::models::{Book, BookReview};
use async_trait::async_trait;

/// Default page size for catalog searches
pub const DEFAULT_MAX_RESULTS: usize = 30;

/// A book catalog provider
#[async_trait]
pub trait CatalogSource: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Search the catalog for free text, preserving provider order
    ///
    /// A blank query returns an empty list without a network call.
    async fn search_catalog(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<Book>, ProviderError>;

    /// Fetch a single book by provider id
    async fn fetch_catalog_item(&self, id: &str) -> Result<Book, ProviderError>;
}

/// A critic review provider
#[async_trait]
pub trait ReviewSource: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Search reviews for a book title
    ///
    /// An absent or blank title returns an empty list without a network call.
    async fn search_reviews(&self, title: Option<&str>) -> Result<Vec<BookReview>, ProviderError>;
}

/// Errors that can occur when calling a provider
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The catalog has no book with the requested id
    #[error("Book not found")]
    NotFound,

    /// Non-success response from the provider
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ProviderError {
    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::NotFound)
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Network(err.to_string())
    }
}

/// Extracts the provider's own error message from an error body
pub(crate) type ErrorExtractor = fn(&[u8]) -> Option<String>;

/// Build an [`ProviderError::Api`] from a non-success response
///
/// `operation` prefixes the status-coded fallback, e.g. `"Search failed"`.
pub(crate) async fn api_error(
    response: reqwest::Response,
    extract: ErrorExtractor,
    operation: &str,
) -> ProviderError {
    let status = response.status().as_u16();
    let body = response.bytes().await.unwrap_or_default();
    let message = extract(&body)
        .unwrap_or_else(|| format!("{} with status {}", operation, status));

    ProviderError::Api { status, message }
}

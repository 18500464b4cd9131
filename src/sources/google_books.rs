//! Google Books catalog source implementation.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::{Config, GOOGLE_BOOKS_BASE_URL};
use crate::models::{Book, GoogleBooksItem, GoogleBooksSearchResponse};
use crate::sources::{api_error, CatalogSource, ProviderError};
use crate::utils::{normalize_catalog_item, HttpClient};

/// Google Books catalog source
///
/// Uses the public Volumes API. The API key travels as the `key` query
/// parameter; without one an empty key is sent and Google decides.
#[derive(Debug, Clone)]
pub struct GoogleBooksSource {
    client: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl GoogleBooksSource {
    /// Create a source for the public endpoint, keyed from `GOOGLE_BOOKS_API_KEY`
    pub fn new() -> Self {
        Self::with_client(
            HttpClient::default(),
            GOOGLE_BOOKS_BASE_URL,
            std::env::var("GOOGLE_BOOKS_API_KEY").ok(),
        )
    }

    /// Create from application configuration
    pub fn from_config(config: &Config, client: HttpClient) -> Self {
        Self::with_client(
            client,
            config.endpoints.google_books.clone(),
            config.api_keys.google_books.clone(),
        )
    }

    /// Create with an explicit client, endpoint and key
    pub fn with_client(
        client: HttpClient,
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        if api_key.as_deref().map_or(true, str::is_empty) {
            tracing::warn!("GOOGLE_BOOKS_API_KEY not set - sending empty key");
        }

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }
}

impl Default for GoogleBooksSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogSource for GoogleBooksSource {
    fn id(&self) -> &str {
        "google_books"
    }

    fn name(&self) -> &str {
        "Google Books"
    }

    async fn search_catalog(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<Book>, ProviderError> {
        if query.trim().is_empty() {
            tracing::debug!("Blank catalog query - skipping request");
            return Ok(Vec::new());
        }

        tracing::debug!(query, max_results, "Searching Google Books");

        let max_results = max_results.to_string();
        let response = self
            .client
            .client()
            .get(&self.base_url)
            .query(&[
                ("q", query),
                ("maxResults", max_results.as_str()),
                ("key", self.key()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Network(format!("Failed to search Google Books: {}", e)))?;

        if !response.status().is_success() {
            let err = api_error(response, error_message, "Search failed").await;
            tracing::warn!("Google Books search failed: {}", err);
            return Err(err);
        }

        let data: GoogleBooksSearchResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(format!("Failed to parse JSON: {}", e)))?;

        let books: Vec<Book> = data
            .items
            .unwrap_or_default()
            .into_iter()
            .map(normalize_catalog_item)
            .collect();

        tracing::debug!(
            "Google Books returned {} of {} items",
            books.len(),
            data.total_items.unwrap_or_default()
        );

        Ok(books)
    }

    async fn fetch_catalog_item(&self, id: &str) -> Result<Book, ProviderError> {
        if id.trim().is_empty() {
            return Err(ProviderError::NotFound);
        }

        let url = format!("{}/{}", self.base_url, urlencoding::encode(id));

        let response = self
            .client
            .client()
            .get(&url)
            .query(&[("key", self.key())])
            .send()
            .await
            .map_err(|e| {
                ProviderError::Network(format!("Failed to fetch Google Books volume: {}", e))
            })?;

        // Google answers unknown or malformed volume ids with 400, not 404
        if response.status() == StatusCode::BAD_REQUEST {
            tracing::debug!(id, "Google Books volume not found");
            return Err(ProviderError::NotFound);
        }

        if !response.status().is_success() {
            let err = api_error(response, error_message, "Failed to fetch book").await;
            tracing::warn!("Google Books fetch failed: {}", err);
            return Err(err);
        }

        let item: GoogleBooksItem = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(format!("Failed to parse JSON: {}", e)))?;

        Ok(normalize_catalog_item(item))
    }
}

/// `{"error": {"code": 403, "message": "..."}}`
fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<GoogleErrorEnvelope>(body)
        .ok()?
        .error?
        .message
        .filter(|m| !m.is_empty())
}

// ===== Google Books error types =====

#[derive(Debug, Deserialize)]
struct GoogleErrorEnvelope {
    error: Option<GoogleErrorBody>,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: Option<String>,
}

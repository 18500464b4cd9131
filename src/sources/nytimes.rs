//! NYTimes Article Search review source implementation.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::{Config, NYTIMES_ARTICLE_SEARCH_URL};
use crate::models::{BookReview, NyTimesArticleSearchResponse};
use crate::sources::{api_error, ProviderError, ReviewSource};
use crate::utils::{normalize_review_article, HttpClient};

/// NYTimes review source
///
/// Queries the Article Search API for book reviews filed in the Books section.
#[derive(Debug, Clone)]
pub struct NyTimesSource {
    client: HttpClient,
    endpoint: String,
    api_key: Option<String>,
}

impl NyTimesSource {
    /// Create a source for the public endpoint, keyed from `NYTIMES_API_KEY`
    pub fn new() -> Self {
        Self::with_client(
            HttpClient::default(),
            NYTIMES_ARTICLE_SEARCH_URL,
            std::env::var("NYTIMES_API_KEY").ok(),
        )
    }

    /// Create from application configuration
    pub fn from_config(config: &Config, client: HttpClient) -> Self {
        Self::with_client(
            client,
            config.endpoints.nytimes_article_search.clone(),
            config.api_keys.nytimes.clone(),
        )
    }

    /// Create with an explicit client, endpoint and key
    pub fn with_client(
        client: HttpClient,
        endpoint: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        if api_key.as_deref().map_or(true, str::is_empty) {
            tracing::warn!("NYTIMES_API_KEY not set - sending empty key");
        }

        Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        }
    }

    /// Filter query selecting reviews of `title` in the Books section
    fn review_filter(title: &str) -> String {
        format!(
            "\"{}\" AND typeOfMaterials:\"Review\" AND section.name:\"Books\"",
            title
        )
    }
}

impl Default for NyTimesSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewSource for NyTimesSource {
    fn id(&self) -> &str {
        "nytimes"
    }

    fn name(&self) -> &str {
        "The New York Times"
    }

    async fn search_reviews(&self, title: Option<&str>) -> Result<Vec<BookReview>, ProviderError> {
        let Some(title) = title.filter(|t| !t.trim().is_empty()) else {
            tracing::debug!("No title - skipping review search");
            return Ok(Vec::new());
        };

        tracing::debug!(title, "Searching NYTimes reviews");

        let filter = Self::review_filter(title);
        let response = self
            .client
            .client()
            .get(&self.endpoint)
            .query(&[
                ("api-key", self.api_key.as_deref().unwrap_or_default()),
                ("fq", filter.as_str()),
                ("sort", "relevance"),
            ])
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ProviderError::Network(format!("Failed to search NYTimes: {}", e)))?;

        // No matching articles is a normal outcome for this API
        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(title, "NYTimes returned 404 - no reviews");
            return Ok(Vec::new());
        }

        if !response.status().is_success() {
            let err = api_error(response, error_message, "Failed to fetch book reviews").await;
            tracing::warn!("NYTimes review search failed: {}", err);
            return Err(err);
        }

        let data: NyTimesArticleSearchResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(format!("Failed to parse JSON: {}", e)))?;

        let reviews = data
            .response
            .map(|r| r.docs)
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, article)| normalize_review_article(article, index))
            .collect();

        Ok(reviews)
    }
}

/// `{"fault": {"faultstring": "Invalid ApiKey", "detail": {...}}}`
fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<NyTimesFaultEnvelope>(body)
        .ok()?
        .fault?
        .faultstring
        .filter(|m| !m.is_empty())
}

// ===== NYTimes error types =====

#[derive(Debug, Deserialize)]
struct NyTimesFaultEnvelope {
    fault: Option<NyTimesFault>,
}

#[derive(Debug, Deserialize)]
struct NyTimesFault {
    faultstring: Option<String>,
}

//! Book model representing a catalog volume from any provider.

use serde::{Deserialize, Serialize};

/// Author placeholder used when the provider omits the author list
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Title placeholder used when the provider omits the title
pub const UNTITLED: &str = "Untitled";

/// A book from the catalog provider
///
/// `title` and `authors` are always populated, even when the upstream payload
/// leaves them out. Everything else is optional and reflects what the provider
/// returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Provider-assigned identifier
    pub id: String,

    /// Book title
    pub title: String,

    /// Authors in provider order (never empty)
    pub authors: Vec<String>,

    /// Publication date as the provider formats it (year, year-month or full date)
    pub published_date: Option<String>,

    /// Description, possibly containing HTML markup
    pub description: Option<String>,

    /// Cover thumbnail URL (always https)
    pub thumbnail: Option<String>,

    /// Average rating on a 0-5 scale
    pub average_rating: Option<f64>,

    /// Number of ratings
    pub ratings_count: Option<u32>,

    /// Page count
    pub page_count: Option<u32>,

    /// Categories in provider order
    pub categories: Option<Vec<String>>,

    /// Publisher name
    pub publisher: Option<String>,

    /// Preview URL
    pub preview_link: Option<String>,

    /// Info page URL
    pub info_link: Option<String>,

    /// ISBN (13-digit preferred over 10-digit)
    pub isbn: Option<String>,

    /// Language code
    pub language: Option<String>,
}

impl Book {
    /// Create a new book with required fields
    ///
    /// An empty author list is replaced with the unknown-author placeholder.
    pub fn new(id: impl Into<String>, title: impl Into<String>, authors: Vec<String>) -> Self {
        let authors = if authors.is_empty() {
            vec![UNKNOWN_AUTHOR.to_string()]
        } else {
            authors
        };

        Self {
            id: id.into(),
            title: title.into(),
            authors,
            published_date: None,
            description: None,
            thumbnail: None,
            average_rating: None,
            ratings_count: None,
            page_count: None,
            categories: None,
            publisher: None,
            preview_link: None,
            info_link: None,
            isbn: None,
            language: None,
        }
    }

    /// Returns the first listed author
    pub fn primary_author(&self) -> &str {
        self.authors
            .first()
            .map(String::as_str)
            .unwrap_or(UNKNOWN_AUTHOR)
    }

    /// Star breakdown for the average rating, `None` when the book has no rating yet
    pub fn star_rating(&self) -> Option<StarRating> {
        self.average_rating.and_then(StarRating::from_rating)
    }

    /// Description with HTML markup removed
    pub fn plain_description(&self) -> Option<String> {
        self.description
            .as_deref()
            .map(crate::utils::clean_html)
            .filter(|text| !text.is_empty())
    }

    /// Check if the provider offers a preview link
    pub fn has_preview(&self) -> bool {
        self.preview_link.is_some()
    }
}

/// Full, half and empty star counts for a 5-star rating display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarRating {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarRating {
    /// Maximum number of stars
    pub const MAX_STARS: u8 = 5;

    /// Break a rating into stars. Zero, negative and non-finite ratings have no stars.
    pub fn from_rating(rating: f64) -> Option<Self> {
        if !rating.is_finite() || rating <= 0.0 {
            return None;
        }

        let clamped = rating.min(f64::from(Self::MAX_STARS));
        let full = clamped.floor() as u8;
        let half = clamped - f64::from(full) >= 0.5;
        let empty = Self::MAX_STARS - full - u8::from(half);

        Some(Self { full, half, empty })
    }
}

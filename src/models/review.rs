//! Critic review model.

use serde::{Deserialize, Serialize};

/// A critical review of a book from the review archive
///
/// `id` combines the source tag, the position in the fetched batch and the
/// provider article id, so it is only unique within a single fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookReview {
    pub id: String,

    /// Publication name
    pub source: String,

    /// Byline, or a generic staff label
    pub author: String,

    /// Calendar date (`YYYY-MM-DD`), empty when unknown
    pub date: String,

    /// Abstract or lead paragraph
    pub summary: String,

    /// Article URL
    pub url: String,
}

impl BookReview {
    /// Whether the review carries any summary text
    pub fn has_summary(&self) -> bool {
        !self.summary.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_summary() {
        let mut review = BookReview {
            id: "nyt-0-a".to_string(),
            source: "The New York Times".to_string(),
            author: "By Reviewer".to_string(),
            date: "2023-01-01".to_string(),
            summary: String::new(),
            url: "https://nytimes.com/a".to_string(),
        };
        assert!(!review.has_summary());

        review.summary = "Great book".to_string();
        assert!(review.has_summary());
    }
}

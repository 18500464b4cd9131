//! State snapshots exposed by the controllers.

use serde::Serialize;

use super::{Book, BookReview};

/// Search screen state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    /// Text currently shown in the search field
    pub query: String,
    pub results: Vec<Book>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl SearchState {
    /// Whether a non-blank query produced nothing and nothing is pending
    pub fn is_empty_result(&self) -> bool {
        !self.query.trim().is_empty()
            && self.results.is_empty()
            && !self.is_loading
            && self.error.is_none()
    }
}

/// Book details screen state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetailsState {
    pub book: Option<Book>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for BookDetailsState {
    fn default() -> Self {
        Self {
            book: None,
            is_loading: true,
            error: None,
        }
    }
}

/// Reviews screen state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsState {
    pub reviews: Vec<BookReview>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for ReviewsState {
    fn default() -> Self {
        Self {
            reviews: Vec::new(),
            is_loading: true,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty_result() {
        assert!(!SearchState::default().is_empty_result());

        let mut state = SearchState {
            query: "zzzz".to_string(),
            ..Default::default()
        };
        assert!(state.is_empty_result());

        state.is_loading = true;
        assert!(!state.is_empty_result());

        state.is_loading = false;
        state.error = Some("Search failed".to_string());
        assert!(!state.is_empty_result());

        state.error = None;
        state.results.push(Book::new("b1", "Dune", Vec::new()));
        assert!(!state.is_empty_result());
    }

    #[test]
    fn test_details_and_reviews_start_loading() {
        assert!(BookDetailsState::default().is_loading);
        assert!(ReviewsState::default().is_loading);
    }
}

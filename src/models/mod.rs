//! Core data models for books, reviews and controller state.

mod book;
mod provider;
mod review;
mod state;

pub use book::{Book, StarRating, UNKNOWN_AUTHOR, UNTITLED};
pub use provider::{
    Byline, GoogleBooksItem, GoogleBooksSearchResponse, ImageLinks, IndustryIdentifier,
    NyTimesArticle, NyTimesArticleSearchResponse, NyTimesDocs, VolumeInfo,
};
pub use review::BookReview;
pub use state::{BookDetailsState, ReviewsState, SearchState};

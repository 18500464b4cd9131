//! # Shelf Scout
//!
//! Search-and-fetch core for a book discovery app: catalog search over Google
//! Books and critic reviews from the NYTimes Article Search API.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (Book, BookReview, controller state, wire types)
//! - [`sources`]: Provider clients behind the `CatalogSource` / `ReviewSource` traits
//! - [`controllers`]: Search, details and reviews state holders
//! - [`utils`]: Normalization, throttling, HTTP client and logging utilities
//! - [`config`]: Configuration management
//!
//! Data flows from user input through the [`SearchController`], its throttle
//! and a [`CatalogSource`] into normalized [`Book`] results.

pub mod config;
pub mod controllers;
pub mod models;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use controllers::{BookDetailsController, ReviewsController, SearchController};
pub use models::{Book, BookReview};
pub use sources::{CatalogSource, GoogleBooksSource, NyTimesSource, ProviderError, ReviewSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

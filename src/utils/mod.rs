//! Utility modules supporting the search pipeline.
//!
//! - [`normalize_catalog_item`] / [`normalize_review_article`]: map provider payloads
//!   into [`Book`](crate::models::Book) and [`BookReview`](crate::models::BookReview)
//! - [`Throttler`]: leading/trailing rate limiter for async actions
//! - [`HttpClient`]: shared HTTP client
//! - [`clean_html`]: plain-text cleanup for descriptions
//! - [`init_tracing`]: tracing subscriber setup
//!
//! # Throttling
//!
//! ```rust,no_run
//! use shelf_scout::utils::{Throttler, DEFAULT_THROTTLE_INTERVAL};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let throttler = Throttler::new(DEFAULT_THROTTLE_INTERVAL, |text: String| async move {
//!     tracing::info!("search {}", text);
//! });
//! throttler.schedule("rust".to_string());
//! # }
//! ```

mod html;
mod http;
mod logging;
mod normalize;
mod throttle;

pub use html::clean_html;
pub use http::HttpClient;
pub use logging::init_tracing;
pub use normalize::{
    normalize_catalog_item, normalize_review_article, NYTIMES_SOURCE_NAME, NYTIMES_SOURCE_TAG,
    NYTIMES_STAFF_BYLINE,
};
pub use throttle::{Throttler, DEFAULT_THROTTLE_INTERVAL};

//! Controllers that own screen state and sequence provider calls.
//!
//! - [`SearchController`]: throttled, stale-safe catalog search driven by keystrokes
//! - [`BookDetailsController`]: fetch one book by id
//! - [`ReviewsController`]: fetch critic reviews for a title
//!
//! Controllers never surface provider errors as `Err`; failures land in the
//! state's `error` field as display strings. State can be read as a snapshot
//! or observed through a `tokio::sync::watch` receiver.

mod details;
mod reviews;
mod search;

pub use details::BookDetailsController;
pub use reviews::ReviewsController;
pub use search::SearchController;

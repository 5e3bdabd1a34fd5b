//! Crate error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExploreError {
    #[error("items per page must be at least 1")]
    InvalidPageSize,

    /// A deep-search request failed. Rendered as a user-visible message on
    /// the search widget, never propagated as a panic.
    #[error("deep search failed: {0}")]
    DeepSearch(String),
}

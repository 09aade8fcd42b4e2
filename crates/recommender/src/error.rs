//! Error types for the recommender crate.

use thiserror::Error;

/// Errors returned by a recommendation lookup
///
/// `TitleNotFound` is an expected outcome for user input, not a fault.
/// Callers should show a "no match" message rather than abort.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    #[error("Title not found in catalog: {title:?}")]
    TitleNotFound { title: String },
}

pub type Result<T> = std::result::Result<T, RecommendError>;

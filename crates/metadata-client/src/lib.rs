//! Movie metadata client.
//!
//! Fetches poster, overview, rating and popularity for a movie id from a
//! remote catalog API. Recommendation output never depends on this crate:
//! every failure here (network, status, malformed body, missing key)
//! degrades to placeholder values instead of an error.
//!
//! - `MetadataSource`: the seam callers depend on
//! - `TmdbClient`: the TMDB implementation, with an LRU cache
//! - `PlaceholderSource`: always returns placeholders (no API configured)

pub mod details;
pub mod tmdb;

use async_trait::async_trait;
use data_loader::MovieId;
use thiserror::Error;

pub use details::{DEFAULT_OVERVIEW, MovieDetails, NOT_AVAILABLE, PLACEHOLDER_POSTER_URL};
pub use tmdb::{TmdbClient, TmdbConfig};

/// Errors from a single metadata lookup
///
/// Only `TmdbClient::try_fetch` returns these; `MetadataSource::fetch`
/// logs them and falls back to placeholders.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("No API key configured")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Metadata API returned status {status} for movie {id}")]
    Status { id: MovieId, status: u16 },

    #[error("Invalid response from metadata API: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Something that can describe a movie by id.
///
/// `fetch` is infallible by contract: implementations must swallow their own
/// failures and return `MovieDetails::placeholder()` (or partial data).
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Returns the name of this source (for logging)
    fn name(&self) -> &str;

    async fn fetch(&self, id: MovieId) -> MovieDetails;
}

/// Source used when no metadata API is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderSource;

#[async_trait]
impl MetadataSource for PlaceholderSource {
    fn name(&self) -> &str {
        "placeholder"
    }

    async fn fetch(&self, _id: MovieId) -> MovieDetails {
        MovieDetails::placeholder()
    }
}

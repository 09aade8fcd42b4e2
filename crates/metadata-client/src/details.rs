//! Display-ready movie metadata and its fallbacks.

use serde::{Deserialize, Serialize};

/// Shown when the API has no poster or could not be reached
pub const PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/500x750?text=No+Image";

/// Shown when the API has no overview or could not be reached
pub const DEFAULT_OVERVIEW: &str = "No overview available.";

/// Rendered in place of a missing rating or popularity
pub const NOT_AVAILABLE: &str = "N/A";

/// Base for poster images at w500 resolution
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Metadata for one movie, always fully populated
///
/// Missing numbers stay `None` so callers can tell "unknown" from zero;
/// use the `*_label` helpers to render them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetails {
    pub poster_url: String,
    pub overview: String,
    pub rating: Option<f64>,
    pub popularity: Option<f64>,
}

impl MovieDetails {
    /// Details used whenever the remote lookup fails
    pub fn placeholder() -> Self {
        Self {
            poster_url: PLACEHOLDER_POSTER_URL.to_string(),
            overview: DEFAULT_OVERVIEW.to_string(),
            rating: None,
            popularity: None,
        }
    }

    pub fn rating_label(&self) -> String {
        label(self.rating)
    }

    pub fn popularity_label(&self) -> String {
        label(self.popularity)
    }

    pub(crate) fn from_response(movie: TmdbMovie) -> Self {
        let poster_url = movie
            .poster_path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(poster_url)
            .unwrap_or_else(|| PLACEHOLDER_POSTER_URL.to_string());

        let overview = movie
            .overview
            .filter(|o| !o.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OVERVIEW.to_string());

        Self {
            poster_url,
            overview,
            rating: movie.vote_average,
            popularity: movie.popularity,
        }
    }
}

impl Default for MovieDetails {
    fn default() -> Self {
        Self::placeholder()
    }
}

fn label(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Full poster URL for an API `poster_path` such as `/kqjL17yufvn9OVLyXYpvtyrFfak.jpg`
pub fn poster_url(poster_path: &str) -> String {
    format!("{}/{}", POSTER_BASE_URL, poster_path.trim_start_matches('/'))
}

/// The fields we read from a `/movie/{id}` response
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TmdbMovie {
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub popularity: Option<f64>,
}

//! Similarity Recommender - "more like this"
//!
//! Ranks every other catalog entry by its precomputed similarity to a
//! chosen title.
//!
//! ## Algorithm
//! 1. Resolve the title to its row index (first exact match in catalog order)
//! 2. Pair every other index with its score from that row, skipping the
//!    query's own column entirely
//! 3. Order by score descending, ties by ascending catalog index
//! 4. Keep the first `n` and map them back to `(title, id)`
//!
//! The ordering in step 3 is total, so results are deterministic even when
//! many movies share a score.

use crate::error::{RecommendError, Result};
use crate::types::Recommendation;
use data_loader::Catalog;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Page size the recommendation grid shows by default
pub const DEFAULT_LIMIT: usize = 10;

/// Looks up similar movies in a shared, read-only catalog
///
/// Cloning is cheap (an `Arc` bump), so hand one to every request handler.
#[derive(Debug, Clone)]
pub struct SimilarityRecommender {
    /// Shared reference to the loaded catalog
    catalog: Arc<Catalog>,

    /// Number of results returned by `recommend_default`
    default_limit: usize,
}

impl SimilarityRecommender {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            default_limit: DEFAULT_LIMIT,
        }
    }

    /// Configure the result count used by `recommend_default` (default: 10)
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Recommend up to `n` movies most similar to `title`
    ///
    /// `title` must match a catalog title exactly (case-sensitive). The
    /// result never contains the query itself and holds
    /// `min(n, catalog size - 1)` entries, most similar first.
    #[instrument(skip(self), fields(catalog_size = self.catalog.len()))]
    pub fn recommend(&self, title: &str, n: usize) -> Result<Vec<Recommendation>> {
        let idx = self
            .catalog
            .index_of(title)
            .ok_or_else(|| RecommendError::TitleNotFound {
                title: title.to_string(),
            })?;

        let ranked = rank_row(self.catalog.matrix().row(idx), idx, n);

        let recommendations: Vec<Recommendation> = ranked
            .into_iter()
            .filter_map(|(other, score)| {
                let movie = self.catalog.movie(other)?;
                Some(Recommendation {
                    movie_id: movie.id,
                    title: movie.title.clone(),
                    score,
                })
            })
            .collect();

        debug!(
            "Ranked {} recommendations for catalog index {}",
            recommendations.len(),
            idx
        );
        Ok(recommendations)
    }

    /// `recommend` with the configured default limit
    pub fn recommend_default(&self, title: &str) -> Result<Vec<Recommendation>> {
        self.recommend(title, self.default_limit)
    }
}

/// Highest score first, then lowest catalog index
///
/// Scores are finite (checked at load), so `partial_cmp` never fails and
/// `0.0` and `-0.0` compare equal.
fn by_rank(a: &(usize, f32), b: &(usize, f32)) -> Ordering {
    b.1.partial_cmp(&a.1)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.0.cmp(&b.0))
}

/// Top `n` `(index, score)` pairs of `row`, excluding column `exclude`
fn rank_row(row: &[f32], exclude: usize, n: usize) -> Vec<(usize, f32)> {
    if n == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(usize, f32)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|&(i, _)| i != exclude)
        .collect();

    // Partition around the n-th best before sorting only the head
    if n < scored.len() {
        scored.select_nth_unstable_by(n - 1, by_rank);
        scored.truncate(n);
    }
    scored.sort_unstable_by(by_rank);
    scored
}

//! # Recommendation Orchestrator
//!
//! Joins the two halves a presentation layer needs for one request:
//! 1. Rank similar movies for the selected title (recommender)
//! 2. Fetch display metadata for each result (metadata source), concurrently
//!
//! Metadata never decides whether a request succeeds. Sources degrade to
//! placeholders on their own, and a panicked lookup task is logged and
//! replaced with placeholders here.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{info, warn};

use data_loader::{Catalog, Movie, MovieId};
use metadata_client::{MetadataSource, MovieDetails};
use recommender::{RecommendError, Recommendation, SimilarityRecommender};

/// Number of matches returned by title search
pub const SEARCH_LIMIT: usize = 10;

/// A recommendation ready to render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub score: f32,
    pub details: MovieDetails,
}

/// The selected movie with its metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedMovie {
    pub movie_id: MovieId,
    pub title: String,
    pub details: MovieDetails,
}

/// Coordinates recommendation and metadata lookups for the caller
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    recommender: SimilarityRecommender,
    metadata: Arc<dyn MetadataSource>,
}

impl std::fmt::Debug for RecommendationOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationOrchestrator")
            .field("movies", &self.catalog().len())
            .field("metadata", &self.metadata.name())
            .finish()
    }
}

impl RecommendationOrchestrator {
    pub fn new(recommender: SimilarityRecommender, metadata: Arc<dyn MetadataSource>) -> Self {
        info!(
            "Orchestrator ready: {} movies, metadata source '{}'",
            recommender.catalog().len(),
            metadata.name()
        );
        Self {
            recommender,
            metadata,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        self.recommender.catalog()
    }

    pub fn default_limit(&self) -> usize {
        self.recommender.default_limit()
    }

    /// Case-insensitive substring search for the title picker
    pub fn search(&self, query: &str) -> Vec<Movie> {
        self.catalog()
            .search_titles(query, SEARCH_LIMIT)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Ranked recommendations without metadata
    ///
    /// A missing title surfaces as `RecommendError::TitleNotFound`, which
    /// callers can recover with `err.downcast_ref::<RecommendError>()`.
    pub async fn recommend(&self, title: &str, limit: usize) -> Result<Vec<Recommendation>> {
        let recommender = self.recommender.clone();
        let title = title.to_string();

        let ranked = tokio::task::spawn_blocking(move || recommender.recommend(&title, limit))
            .await
            .context("Recommendation task panicked")??;
        Ok(ranked)
    }

    /// Main entry point: recommendations for `title`, each with metadata
    ///
    /// # Returns
    /// Up to `limit` recommendations, most similar first
    pub async fn get_recommendations(
        &self,
        title: &str,
        limit: usize,
    ) -> Result<Vec<MovieRecommendation>> {
        let start_time = Instant::now();

        let ranked = self.recommend(title, limit).await?;
        info!("Ranked {} movies similar to {:?}", ranked.len(), title);

        let ids: Vec<MovieId> = ranked.iter().map(|r| r.movie_id).collect();
        let details = self.fetch_details(&ids).await;

        let recommendations: Vec<MovieRecommendation> = ranked
            .into_iter()
            .zip(details)
            .map(|(rec, details)| MovieRecommendation {
                movie_id: rec.movie_id,
                title: rec.title,
                score: rec.score,
                details,
            })
            .collect();

        info!(
            "Built {} recommendations for {:?} in {:.2?}",
            recommendations.len(),
            title,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Metadata for the movie the user selected (exact title match)
    pub async fn selected_movie(&self, title: &str) -> Result<SelectedMovie> {
        let movie = self
            .catalog()
            .index_of(title)
            .and_then(|idx| self.catalog().movie(idx))
            .cloned()
            .ok_or_else(|| RecommendError::TitleNotFound {
                title: title.to_string(),
            })?;

        let details = self.metadata.fetch(movie.id).await;
        Ok(SelectedMovie {
            movie_id: movie.id,
            title: movie.title,
            details,
        })
    }

    /// Fetch metadata for every id concurrently, keeping input order
    async fn fetch_details(&self, ids: &[MovieId]) -> Vec<MovieDetails> {
        let mut tasks = JoinSet::new();
        for (pos, &id) in ids.iter().enumerate() {
            let metadata = Arc::clone(&self.metadata);
            tasks.spawn(async move { (pos, metadata.fetch(id).await) });
        }

        let mut details = vec![MovieDetails::placeholder(); ids.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((pos, d)) => details[pos] = d,
                Err(e) => warn!("Metadata task failed, keeping placeholders: {}", e),
            }
        }
        details
    }
}

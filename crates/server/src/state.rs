//! Explicit startup phase and readiness check.
//!
//! The catalog is loaded exactly once, by `AppState::initialize`, before any
//! request is served. Handlers ask `AppState::orchestrator()` for a handle and
//! get `NotReady` until that load has finished.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use data_loader::Catalog;
use metadata_client::{MetadataSource, PlaceholderSource, TmdbClient};
use recommender::SimilarityRecommender;

use crate::config::Config;
use crate::orchestrator::RecommendationOrchestrator;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Catalog has not finished loading")]
    NotReady,

    #[error("Catalog is already loaded")]
    AlreadyInitialized,
}

/// Process-wide holder for the loaded orchestrator
#[derive(Default)]
pub struct AppState {
    ready: OnceLock<Arc<RecommendationOrchestrator>>,
    /// Serialises initialisation so two callers cannot both load
    init_lock: Mutex<()>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.ready.get().is_some()
    }

    /// Handle for request handlers; fails until `initialize` has succeeded
    pub fn orchestrator(&self) -> Result<Arc<RecommendationOrchestrator>, StateError> {
        self.ready.get().cloned().ok_or(StateError::NotReady)
    }

    /// Load the catalog and wire up the orchestrator
    ///
    /// Steps:
    /// 1. Ensure the artifact exists locally, downloading if configured
    /// 2. Parse it (both on a blocking thread)
    /// 3. Build the recommender and the metadata source
    /// 4. Publish the orchestrator
    ///
    /// Any load error is returned and leaves the state not ready.
    pub async fn initialize(&self, config: &Config) -> Result<Arc<RecommendationOrchestrator>> {
        let _guard = self.init_lock.lock().await;
        if self.is_ready() {
            return Err(StateError::AlreadyInitialized.into());
        }

        let path: PathBuf = config.artifact_path.clone();
        let url = config.artifact_url.clone();
        let catalog = tokio::task::spawn_blocking(move || Catalog::load(&path, url.as_deref()))
            .await
            .context("Catalog load task panicked")?
            .context("Failed to load similarity artifact")?;

        let recommender = SimilarityRecommender::new(Arc::new(catalog))
            .with_default_limit(config.recommendation_limit);

        let metadata: Arc<dyn MetadataSource> = if config.tmdb_api_key.is_some() {
            Arc::new(
                TmdbClient::new(config.metadata_config())
                    .context("Failed to build metadata client")?,
            )
        } else {
            info!("No TMDB API key configured, metadata will use placeholders");
            Arc::new(PlaceholderSource)
        };

        self.install(RecommendationOrchestrator::new(recommender, metadata))
    }

    /// Publish an already-built orchestrator (for embedding and tests)
    pub fn install(
        &self,
        orchestrator: RecommendationOrchestrator,
    ) -> Result<Arc<RecommendationOrchestrator>> {
        let orchestrator = Arc::new(orchestrator);
        self.ready
            .set(orchestrator.clone())
            .map_err(|_| StateError::AlreadyInitialized)?;
        Ok(orchestrator)
    }
}

//! Test harness for the recommendation orchestrator.
//!
//! Loads the artifact named by the environment, then logs recommendations
//! for `SAMPLE_TITLE` (or the first catalog entry).

use anyhow::Result;
use tracing::{info, warn};

use recommender::RecommendError;
use server::{AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "info,server=debug,recommender=debug,data_loader=debug",
                )
            }),
        )
        .init();

    let config = Config::from_env()?;
    info!("Starting similar-movie harness");

    let state = AppState::new();
    let orchestrator = state.initialize(&config).await?;

    let title = match config.sample_title.clone() {
        Some(title) => title,
        None => match orchestrator.catalog().movie(0) {
            Some(movie) => movie.title.clone(),
            None => {
                warn!("Catalog is empty, nothing to recommend");
                return Ok(());
            }
        },
    };

    let selected = match orchestrator.selected_movie(&title).await {
        Ok(selected) => selected,
        Err(e) if e.downcast_ref::<RecommendError>().is_some() => {
            warn!("No movie titled {:?}", title);
            for movie in orchestrator.search(&title) {
                info!("   Did you mean: {}", movie.title);
            }
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    info!(
        "{} - Rating: {} - Popularity: {}",
        selected.title,
        selected.details.rating_label(),
        selected.details.popularity_label()
    );
    info!("   {}", selected.details.overview);

    let recommendations = orchestrator
        .get_recommendations(&title, orchestrator.default_limit())
        .await?;

    info!("Top {} movies similar to {}:", recommendations.len(), title);
    for (i, rec) in recommendations.iter().enumerate() {
        info!(
            "{}. {} (id {}) - Similarity: {:.3} - Rating: {}",
            i + 1,
            rec.title,
            rec.movie_id,
            rec.score,
            rec.details.rating_label()
        );
        info!("   Poster: {}", rec.details.poster_url);
    }

    Ok(())
}

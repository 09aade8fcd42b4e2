//! Server crate for the similar-movie recommender.
//!
//! Holds the caller-side glue: configuration, the explicit startup phase
//! that loads the catalog once, and the orchestrator that pairs
//! recommendations with display metadata.

pub mod config;
pub mod orchestrator;
pub mod state;

pub use config::Config;
pub use orchestrator::{MovieRecommendation, RecommendationOrchestrator, SEARCH_LIMIT, SelectedMovie};
pub use state::{AppState, StateError};

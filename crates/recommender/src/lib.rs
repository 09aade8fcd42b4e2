//! # Recommender Crate
//!
//! Content-based "more like this" lookups over a loaded `Catalog`.
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Catalog;
//! use recommender::SimilarityRecommender;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(Catalog::load(Path::new("movie_dict.json"), None)?);
//! let recommender = SimilarityRecommender::new(catalog);
//!
//! for rec in recommender.recommend("Avatar", 10)? {
//!     println!("{} ({})", rec.title, rec.movie_id);
//! }
//! ```
//!
//! The recommender never mutates the catalog, so one instance (or any
//! number of clones) can serve concurrent requests without locking.

pub mod error;
pub mod similarity;
pub mod types;

// Re-export commonly used types
pub use error::{RecommendError, Result};
pub use similarity::{DEFAULT_LIMIT, SimilarityRecommender};
pub use types::Recommendation;

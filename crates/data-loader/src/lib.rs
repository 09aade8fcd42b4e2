//! # Data Loader Crate
//!
//! The catalog store: loads the precomputed similarity artifact (movie list
//! plus square similarity matrix) and answers title lookups over it.
//!
//! ## Main Components
//!
//! - **types**: `Movie`, `SimilarityMatrix`, `Catalog`
//! - **fetch**: download-if-absent for the artifact file
//! - **parser**: decode and validate artifact bytes
//! - **loader**: `Catalog::load`, the two steps above in sequence
//! - **error**: error types for loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Catalog;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(Catalog::load(Path::new("movie_dict.json"), None)?);
//!
//! let idx = catalog.index_of("Avatar").unwrap();
//! let row = catalog.matrix().row(idx);
//! println!("{} scores for {}", row.len(), catalog.movie(idx).unwrap().title);
//! ```

// Public modules
pub mod error;
pub mod fetch;
pub mod loader;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use fetch::ensure_local_copy;
pub use parser::{parse_artifact, read_artifact};
pub use types::{Catalog, Movie, MovieId, SimilarityMatrix};

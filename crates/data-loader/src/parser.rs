//! Parser for the precomputed similarity artifact.
//!
//! The artifact is a single JSON document so the movie list and the matrix
//! can never come from two different builds:
//!
//! ```text
//! {
//!   "movies":     [{"movie_id": 19995, "title": "Avatar"}, ...],
//!   "similarity": [[1.0, 0.12, ...], ...]
//! }
//! ```
//!
//! This module only turns bytes into a `Catalog`. Getting the bytes onto
//! disk is `fetch`'s job.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// On-disk shape of the artifact
#[derive(Deserialize)]
struct RawArtifact {
    movies: Vec<Movie>,
    similarity: Vec<Vec<f32>>,
}

/// Parse artifact bytes into a validated `Catalog`
///
/// Fails with `ArtifactCorrupt` if decoding fails, if the matrix is not
/// square, if its size disagrees with the movie list, or if any score is
/// not a finite number.
pub fn parse_artifact(bytes: &[u8]) -> Result<Catalog> {
    let raw: RawArtifact = serde_json::from_slice(bytes)?;

    if raw.similarity.len() != raw.movies.len() {
        return Err(DataLoadError::ArtifactCorrupt(format!(
            "artifact lists {} movies but {} similarity rows",
            raw.movies.len(),
            raw.similarity.len()
        )));
    }

    let matrix = SimilarityMatrix::from_rows(raw.similarity)?;
    Catalog::new(raw.movies, matrix)
}

/// Read and parse an artifact already present on local disk
///
/// Fails with `ArtifactUnavailable` if the file cannot be read.
pub fn read_artifact(path: &Path) -> Result<Catalog> {
    let bytes =
        fs::read(path).map_err(|e| DataLoadError::unavailable(path.display().to_string(), e))?;
    parse_artifact(&bytes)
}

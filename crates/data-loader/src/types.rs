//! Core domain types for the movie catalog.
//!
//! A `Catalog` pairs the ordered movie list with the similarity matrix that
//! was computed over it. Row `i` of the matrix always describes movie `i` of
//! the list; nothing in this crate ever reorders either side.

use crate::error::{DataLoadError, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Stable external identifier for a movie (the remote catalog's id)
pub type MovieId = u32;

// =============================================================================
// Movie
// =============================================================================

/// A movie in the catalog
///
/// The artifact names the id column `movie_id`; plain `id` is accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "movie_id", alias = "id")]
    pub id: MovieId,
    pub title: String,
}

impl Movie {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

// =============================================================================
// SimilarityMatrix
// =============================================================================

/// Square matrix of pairwise similarity scores, stored row-major
///
/// Higher scores mean more similar. The diagonal holds self-similarity.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    dim: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Build a matrix from nested rows, rejecting ragged or non-finite input
    ///
    /// Rows are checked in parallel since real artifacts hold a few thousand
    /// rows of a few thousand scores each.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let dim = rows.len();

        rows.par_iter().enumerate().try_for_each(|(i, row)| {
            if row.len() != dim {
                return Err(DataLoadError::ArtifactCorrupt(format!(
                    "similarity row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    dim
                )));
            }
            if let Some(j) = row.iter().position(|s| !s.is_finite()) {
                return Err(DataLoadError::ArtifactCorrupt(format!(
                    "similarity score at ({}, {}) is not finite",
                    i, j
                )));
            }
            Ok(())
        })?;

        let scores = rows.into_iter().flatten().collect();
        Ok(Self { dim, scores })
    }

    /// Number of rows (and columns)
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// All scores of row `i`, one per catalog entry
    ///
    /// Panics if `i` is out of range, like slice indexing.
    pub fn row(&self, i: usize) -> &[f32] {
        let start = i * self.dim;
        &self.scores[start..start + self.dim]
    }

    /// Score between movie `i` and movie `j`, if both are in range
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i < self.dim && j < self.dim {
            Some(self.scores[i * self.dim + j])
        } else {
            None
        }
    }
}

// =============================================================================
// Catalog - movie list + matrix, loaded together
// =============================================================================

/// The loaded artifact: ordered movies plus their similarity matrix.
///
/// Read-only once built. Share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub(crate) movies: Vec<Movie>,
    pub(crate) matrix: SimilarityMatrix,
    /// Title -> first catalog index carrying that title
    pub(crate) title_index: HashMap<String, usize>,
}

impl Catalog {
    /// Pair a movie list with its matrix
    ///
    /// Fails with `ArtifactCorrupt` if the two sizes disagree.
    pub fn new(movies: Vec<Movie>, matrix: SimilarityMatrix) -> Result<Self> {
        if movies.len() != matrix.dim() {
            return Err(DataLoadError::ArtifactCorrupt(format!(
                "catalog has {} movies but similarity matrix is {}x{}",
                movies.len(),
                matrix.dim(),
                matrix.dim()
            )));
        }

        let mut title_index = HashMap::with_capacity(movies.len());
        for (idx, movie) in movies.iter().enumerate() {
            // Keep the first occurrence so duplicate titles resolve deterministically
            title_index.entry(movie.title.clone()).or_insert(idx);
        }

        Ok(Self {
            movies,
            matrix,
            title_index,
        })
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Movies in catalog (matrix) order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Movie at catalog index `idx`
    pub fn movie(&self, idx: usize) -> Option<&Movie> {
        self.movies.get(idx)
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    /// Catalog index of the first movie whose title matches exactly
    ///
    /// Case-sensitive. Use `search_titles` for fuzzy lookups.
    pub fn index_of(&self, title: &str) -> Option<usize> {
        self.title_index.get(title).copied()
    }

    /// Case-insensitive substring search over titles, in catalog order
    ///
    /// Returns at most `limit` movies. A blank query matches nothing.
    pub fn search_titles(&self, query: &str, limit: usize) -> Vec<&Movie> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.movies
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&query))
            .take(limit)
            .collect()
    }
}

//! Result types shared by recommendation callers.

use data_loader::MovieId;
use serde::Serialize;

/// One ranked recommendation
///
/// `score` is the raw similarity to the query title, exposed so callers can
/// show or threshold it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub score: f32,
}

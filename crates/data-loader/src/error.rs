//! Error types for the data-loader crate.
//!
//! Loading an artifact can only fail in two ways: the bytes are not there,
//! or the bytes are there but do not describe a consistent catalog.

use thiserror::Error;

/// Errors that can occur while fetching, reading or parsing the artifact
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// The artifact could not be read locally or downloaded
    #[error("Artifact unavailable at {location}: {reason}")]
    ArtifactUnavailable { location: String, reason: String },

    /// The artifact was read but is malformed or internally inconsistent
    ///
    /// Covers JSON decoding failures, a matrix whose size disagrees with the
    /// movie list, ragged rows and non-finite scores.
    #[error("Artifact corrupt: {0}")]
    ArtifactCorrupt(String),
}

impl DataLoadError {
    pub(crate) fn unavailable(location: impl Into<String>, reason: impl ToString) -> Self {
        DataLoadError::ArtifactUnavailable {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for DataLoadError {
    fn from(e: serde_json::Error) -> Self {
        DataLoadError::ArtifactCorrupt(format!("failed to decode artifact: {}", e))
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;

//! One-shot catalog loading.
//!
//! Composes the two independent steps: make sure a local copy of the
//! artifact exists, then parse it. Meant to run once at process start.

use crate::error::Result;
use crate::fetch::ensure_local_copy;
use crate::parser::read_artifact;
use crate::types::Catalog;
use std::path::Path;
use std::time::Instant;
use tracing::info;

impl Catalog {
    /// Load the catalog and its similarity matrix from a single artifact
    ///
    /// Steps:
    /// 1. Ensure `path` exists, downloading from `remote_url` if it does not
    /// 2. Parse and validate the artifact
    ///
    /// Any failure is fatal for the caller: no partial catalog is returned.
    pub fn load(path: &Path, remote_url: Option<&str>) -> Result<Self> {
        let start = Instant::now();
        info!("Loading similarity artifact from {:?}", path);

        let local = ensure_local_copy(path, remote_url)?;
        let catalog = read_artifact(&local)?;

        info!(
            "Loaded {} movies and a {}x{} similarity matrix in {:.2?}",
            catalog.len(),
            catalog.matrix().dim(),
            catalog.matrix().dim(),
            start.elapsed()
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataLoadError;
    use std::fs;
    use std::path::PathBuf;

    fn write_fixture(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "data-loader-load-{}-{}",
            std::process::id(),
            name
        ));
        fs::write(&path, body).unwrap();
        path
    }

    const ARTIFACT: &str = r#"{
        "movies": [
            {"movie_id": 1, "title": "A"},
            {"movie_id": 2, "title": "B"},
            {"movie_id": 3, "title": "C"}
        ],
        "similarity": [
            [1.0, 0.8, 0.1],
            [0.8, 1.0, 0.4],
            [0.1, 0.4, 1.0]
        ]
    }"#;

    #[test]
    fn test_load_twice_is_identical() {
        let path = write_fixture("roundtrip.json", ARTIFACT);

        let first = Catalog::load(&path, None).unwrap();
        let second = Catalog::load(&path, None).unwrap();

        assert_eq!(first.movies(), second.movies());
        assert_eq!(first.matrix(), second.matrix());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_preserves_order() {
        let path = write_fixture("order.json", ARTIFACT);
        let catalog = Catalog::load(&path, None).unwrap();

        let titles: Vec<&str> = catalog.movies().iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
        assert_eq!(catalog.matrix().row(1), &[0.8, 1.0, 0.4]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_corrupt_file() {
        let path = write_fixture("corrupt.json", r#"{"movies": [{"movie_id": 1, "title": "A"}], "similarity": [[1.0, 0.2]]}"#);
        let err = Catalog::load(&path, None).unwrap_err();
        assert!(matches!(err, DataLoadError::ArtifactCorrupt(_)));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("data-loader-load-does-not-exist.json");
        let err = Catalog::load(&path, None).unwrap_err();
        assert!(matches!(err, DataLoadError::ArtifactUnavailable { .. }));
    }
}

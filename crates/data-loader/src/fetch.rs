//! Download-if-absent for the artifact.
//!
//! Kept apart from parsing: this module moves bytes from a remote blob
//! location onto local disk and knows nothing about their format.

use crate::error::{DataLoadError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Make sure the artifact exists at `path`, downloading it if needed
///
/// - `path` already exists: returned as-is, no network I/O
/// - missing and no `remote_url`: `ArtifactUnavailable`
/// - missing with a `remote_url`: blocking GET, written next to `path`
///   under a temporary name, then renamed into place
///
/// There is no refresh or eviction. Once a copy exists it is used forever.
pub fn ensure_local_copy(path: &Path, remote_url: Option<&str>) -> Result<PathBuf> {
    if path.exists() {
        debug!("Artifact already present at {:?}", path);
        return Ok(path.to_path_buf());
    }

    let url = remote_url.ok_or_else(|| {
        DataLoadError::unavailable(
            path.display().to_string(),
            "file missing and no remote location configured",
        )
    })?;

    info!("Artifact missing at {:?}, downloading from {}", path, url);
    let bytes = download(url)?;

    let tmp_path = temp_path_for(path);
    write_file(&tmp_path, &bytes).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        DataLoadError::unavailable(path.display().to_string(), e)
    })?;
    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        DataLoadError::unavailable(path.display().to_string(), e)
    })?;

    info!("Cached {} bytes to {:?}", bytes.len(), path);
    Ok(path.to_path_buf())
}

fn download(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::blocking::get(url).map_err(|e| DataLoadError::unavailable(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DataLoadError::unavailable(
            url,
            format!("remote returned status {}", status),
        ));
    }

    let bytes = response
        .bytes()
        .map_err(|e| DataLoadError::unavailable(url, e))?;
    Ok(bytes.to_vec())
}

fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// Sibling path used while a download is in flight
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}

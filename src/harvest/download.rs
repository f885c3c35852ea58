// src/harvest/download.rs
// =============================================================================
// Downloads one discovered Markdown file into the output directory.
//
// Files are named "<repo>_<index>.md". The index is the file's 1-based
// position in its repository's discovery list, so names never collide
// within a run and a re-run overwrites the same names.
// =============================================================================

use crate::error::DownloadError;
use crate::github::TreeEntry;
use reqwest::{Client, StatusCode};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the saved copy of the `index`-th file of `repo_name`
pub fn output_filename(repo_name: &str, index: usize) -> String {
    format!("{}_{}.md", repo_name, index)
}

/// Creates the output directory if missing. Returns true if it was created.
///
/// An existing directory is left untouched, including its contents.
pub fn ensure_output_dir(dir: &Path) -> io::Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(dir)?;
    Ok(true)
}

// Fetches the raw bytes of `entry` and writes them to
// <output_dir>/<repo_name>_<index>.md
//
// Only HTTP 200 counts as success. The raw host is fetched without the API
// token: download URLs of private repositories already carry their own.
pub async fn download_file(
    http: &Client,
    output_dir: &Path,
    entry: &TreeEntry,
    repo_name: &str,
    index: usize,
) -> Result<PathBuf, DownloadError> {
    let url = match entry.download_url.as_deref() {
        Some(url) if !url.is_empty() => url,
        _ => return Err(DownloadError::MissingUrl(entry.path.clone())),
    };

    debug!(path = %entry.path, %url, index, "Downloading");

    let http_error = |source| DownloadError::Http {
        path: entry.path.clone(),
        source,
    };

    let response = http.get(url).send().await.map_err(http_error)?;

    if response.status() != StatusCode::OK {
        return Err(DownloadError::Status {
            path: entry.path.clone(),
            status: response.status().as_u16(),
        });
    }

    let body = response.bytes().await.map_err(http_error)?;

    let target = output_dir.join(output_filename(repo_name, index));
    tokio::fs::write(&target, &body)
        .await
        .map_err(|source| DownloadError::Io {
            target: target.clone(),
            source,
        })?;

    Ok(target)
}

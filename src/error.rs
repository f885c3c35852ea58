// src/error.rs
// =============================================================================
// Error types for the three stages of a harvest run.
//
// - HarvestError: listing repositories or walking a repository's contents
// - DownloadError: fetching and saving a single Markdown file
//
// Each stage returns these as values. The pipeline in harvest/ decides what
// to do with them (stop the run, skip the repository, skip the file).
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Failures while talking to the GitHub REST API.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// The user listing endpoint answered 404
    #[error("GitHub user '{0}' was not found")]
    UserNotFound(String),

    /// 403/429 with no remaining quota
    #[error("GitHub API rate limit exceeded (set GITHUB_TOKEN for a higher limit)")]
    RateLimited,

    /// Any other non-success status
    #[error("GitHub API returned HTTP {status} for {url}: {message}")]
    Api {
        url: String,
        status: u16,
        message: String,
    },

    /// The configured API base cannot carry path segments (e.g. "mailto:")
    #[error("invalid GitHub API base URL: {0}")]
    InvalidApiUrl(String),

    /// Connection, TLS or body decoding failure
    #[error("request to GitHub failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failures while downloading one discovered file.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Download URL not found for {0}")]
    MissingUrl(String),

    #[error("Failed to download {path}: Status {status}")]
    Status { path: String, status: u16 },

    #[error("Error downloading {path}: {source}")]
    Http {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Error writing {}: {source}", .target.display())]
    Io {
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

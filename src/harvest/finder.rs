// src/harvest/finder.rs
// =============================================================================
// Finds every Markdown file in a repository.
//
// The repository tree is walked depth-first with an explicit stack of
// directory listings: pop a listing, push the listing of each subdirectory,
// keep each ".md" file. A GitHub contents tree has no cycles, so every entry
// is seen exactly once.
//
// The result order is whatever the stack produces; it is not sorted.
// =============================================================================

use crate::error::HarvestError;
use crate::github::{GitHubClient, Repository, TreeEntry};
use tracing::debug;

/// Collects all Markdown files reachable from the repository root.
///
/// Any listing failure aborts the walk; partial results are discarded.
pub async fn find_markdown_files(client: &GitHubClient, repo: &Repository) -> Result<Vec<TreeEntry>, HarvestError> {
    let mut markdown_files = Vec::new();
    let mut stack = vec![client.list_contents(repo, "").await?];

    while let Some(listing) = stack.pop() {
        for entry in listing {
            if entry.is_dir() {
                debug!(repo = %repo.full_name, dir = %entry.path, "Descending");
                stack.push(client.list_contents(repo, &entry.path).await?);
            } else if entry.is_markdown() {
                debug!(repo = %repo.full_name, file = %entry.name, path = %entry.path, "Found Markdown file");
                markdown_files.push(entry);
            }
        }
    }

    Ok(markdown_files)
}

// src/github/mod.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Currently implements:
// - Listing all repositories of a user (with pagination)
// - Listing the contents of one directory of a repository
// - Optional token authentication and GitHub Enterprise base URLs
// =============================================================================

mod client;
mod types;

pub use client::GitHubClient;
pub use types::{EntryKind, Repository, TreeEntry};

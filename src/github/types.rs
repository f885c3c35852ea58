// src/github/types.rs
// =============================================================================
// The subset of GitHub REST payloads we care about.
//
// serde ignores every field we don't declare, so these structs stay small
// even though the real responses are huge.
// =============================================================================

use serde::{Deserialize, Serialize};

/// One entry of `GET /users/{user}/repos`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub owner: RepoOwner,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoOwner {
    pub login: String,
}

/// What a contents entry points at.
///
/// GitHub also reports "symlink" and "submodule"; those are neither walked
/// nor downloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum EntryKind {
    File,
    Dir,
    Other,
}

impl From<String> for EntryKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "file" => EntryKind::File,
            "dir" => EntryKind::Dir,
            _ => EntryKind::Other,
        }
    }
}

/// One entry of `GET /repos/{owner}/{repo}/contents/{path}`
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Raw URL; null for directories and submodules
    #[serde(default)]
    pub download_url: Option<String>,
}

impl TreeEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    /// Files whose path ends in ".md" (case-sensitive)
    pub fn is_markdown(&self) -> bool {
        self.kind == EntryKind::File && self.path.ends_with(".md")
    }
}

// src/harvest/mod.rs
// =============================================================================
// The harvest pipeline: list repositories, find Markdown files, download.
//
// Flow for one run:
// 1. List every repository of the user (a failure here ends the run)
// 2. For each repository, in order:
//    a. Walk its tree for ".md" files (a failure means "no files")
//    b. Download each file as <repo>_<n>.md, n = 1..=N (a failure skips it)
//
// Repositories are processed one at a time, and so are their files.
// Every outcome is recorded in a RunReport that main.rs prints.
// =============================================================================

mod download;
mod finder;

pub use download::{download_file, ensure_output_dir};
pub use finder::find_markdown_files;

use crate::error::HarvestError;
use crate::github::{GitHubClient, Repository};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// A file that was discovered but not saved
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub index: usize,
    pub path: String,
    pub reason: String,
}

/// Outcome for a single repository
#[derive(Debug, Clone, Serialize)]
pub struct RepoReport {
    pub name: String,
    /// Number of Markdown files found by the tree walk
    pub discovered: usize,
    pub downloaded: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
    /// Set when the tree walk failed; `discovered` is then 0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_error: Option<String>,
}

/// Outcome for a whole run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub username: String,
    pub repositories: Vec<RepoReport>,
}

impl RunReport {
    pub fn downloaded_count(&self) -> usize {
        self.repositories.iter().map(|r| r.downloaded.len()).sum()
    }

    pub fn failed_count(&self) -> usize {
        self.repositories.iter().map(|r| r.failures.len()).sum()
    }

    /// Repositories whose tree could not be walked
    pub fn unreadable_count(&self) -> usize {
        self.repositories
            .iter()
            .filter(|r| r.listing_error.is_some())
            .count()
    }
}

pub struct Harvester {
    client: GitHubClient,
    output_dir: PathBuf,
}

impl Harvester {
    pub fn new(client: GitHubClient, output_dir: PathBuf) -> Self {
        Self { client, output_dir }
    }

    /// Harvests every repository of `username`.
    ///
    /// Only a failure to list the repositories is returned as an error;
    /// everything after that is recorded in the report.
    pub async fn run(&self, username: &str) -> Result<RunReport, HarvestError> {
        let repos = self.client.list_repositories(username).await.map_err(|e| {
            error!(username, error = %e, "Error fetching repositories");
            e
        })?;

        println!("\nNumber of repositories found for user '{}': {}", username, repos.len());

        let mut repositories = Vec::with_capacity(repos.len());
        for repo in &repos {
            repositories.push(self.process_repository(repo).await);
        }

        Ok(RunReport {
            username: username.to_string(),
            repositories,
        })
    }

    /// Finds and downloads all Markdown files of one repository
    pub async fn process_repository(&self, repo: &Repository) -> RepoReport {
        println!("\nProcessing repository: {}", repo.name);

        let mut report = RepoReport {
            name: repo.name.clone(),
            discovered: 0,
            downloaded: Vec::new(),
            failures: Vec::new(),
            listing_error: None,
        };

        let files = match find_markdown_files(&self.client, repo).await {
            Ok(files) => files,
            Err(e) => {
                warn!(repo = %repo.full_name, error = %e, "Error fetching files in repository");
                report.listing_error = Some(e.to_string());
                Vec::new()
            }
        };

        report.discovered = files.len();
        println!(".md files found: {}", files.len());

        // enumerate from 1: every discovered file keeps its slot even if it fails
        for (index, file) in files.iter().enumerate().map(|(i, f)| (i + 1, f)) {
            match download_file(self.client.http(), &self.output_dir, file, &repo.name, index).await {
                Ok(target) => {
                    println!("Downloaded: {}", target.display());
                    info!(repo = %repo.name, path = %file.path, index, "Saved file");
                    report.downloaded.push(target);
                }
                Err(e) => {
                    warn!(repo = %repo.name, index, "{}", e);
                    report.failures.push(FileFailure {
                        index,
                        path: file.path.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::download::output_filename;
    use super::*;
    use crate::config::Config;
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn harvester_for(server: &MockServer, output_dir: PathBuf) -> Harvester {
        let config = Config {
            output_dir: output_dir.clone(),
            token: None,
            api_base: Url::parse(&server.uri()).unwrap(),
        };
        Harvester::new(GitHubClient::new(&config).unwrap(), output_dir)
    }

    async fn mount_json(server: &MockServer, url_path: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(url_path))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    async fn mount_raw(server: &MockServer, url_path: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(url_path))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .expect(1)
            .mount(server)
            .await;
    }

    fn file_json(server: &MockServer, file_path: &str) -> serde_json::Value {
        json!({
            "name": file_path.rsplit('/').next().unwrap(),
            "path": file_path,
            "type": "file",
            "download_url": format!("{}/raw/{}", server.uri(), file_path)
        })
    }

    #[tokio::test]
    async fn test_docs_repository_end_to_end() {
        let server = MockServer::start().await;
        mount_json(&server, "/users/octo/repos", json!([
            {"name": "docs", "full_name": "octo/docs", "owner": {"login": "octo"}}
        ])).await;
        mount_json(&server, "/repos/octo/docs/contents", json!([
            file_json(&server, "README.md"),
            file_json(&server, "index.html"),
            {"name": "guides", "path": "guides", "type": "dir", "download_url": null}
        ])).await;
        mount_json(&server, "/repos/octo/docs/contents/guides", json!([
            file_json(&server, "guides/setup.md")
        ])).await;
        mount_raw(&server, "/raw/README.md", 200, "readme").await;
        mount_raw(&server, "/raw/guides/setup.md", 200, "setup").await;
        // index.html must never be fetched
        Mock::given(method("GET"))
            .and(path("/raw/index.html"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let harvester = harvester_for(&server, tmp.path().to_path_buf());
        let report = harvester.run("octo").await.unwrap();

        assert_eq!(report.repositories.len(), 1);
        let docs = &report.repositories[0];
        assert_eq!(docs.discovered, 2);
        assert!(docs.failures.is_empty());

        let mut written: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        written.sort();
        assert_eq!(written, vec!["docs_1.md", "docs_2.md"]);

        let mut contents: Vec<_> = written
            .iter()
            .map(|name| std::fs::read_to_string(tmp.path().join(name)).unwrap())
            .collect();
        contents.sort();
        assert_eq!(contents, vec!["readme", "setup"]);
    }

    #[tokio::test]
    async fn test_failed_download_keeps_index_and_continues() {
        let server = MockServer::start().await;
        mount_json(&server, "/users/octo/repos", json!([
            {"name": "notes", "full_name": "octo/notes", "owner": {"login": "octo"}}
        ])).await;
        mount_json(&server, "/repos/octo/notes/contents", json!([
            file_json(&server, "a.md"),
            file_json(&server, "b.md"),
            file_json(&server, "c.md")
        ])).await;
        mount_raw(&server, "/raw/a.md", 200, "a").await;
        mount_raw(&server, "/raw/b.md", 500, "").await;
        mount_raw(&server, "/raw/c.md", 200, "c").await;

        let tmp = tempfile::tempdir().unwrap();
        let harvester = harvester_for(&server, tmp.path().to_path_buf());
        let report = harvester.run("octo").await.unwrap();

        let notes = &report.repositories[0];
        assert_eq!(notes.discovered, 3);
        assert_eq!(notes.downloaded.len(), 2);
        assert_eq!(notes.failures.len(), 1);
        assert_eq!(notes.failures[0].path, "b.md");

        // Indices cover 1..=3; the failed file's slot stays empty
        let failed_index = notes.failures[0].index;
        assert!((1..=3).contains(&failed_index));
        for index in 1..=3 {
            let exists = tmp.path().join(output_filename("notes", index)).exists();
            assert_eq!(exists, index != failed_index);
        }
        assert_eq!(report.downloaded_count(), 2);
        assert_eq!(report.failed_count(), 1);
    }

    #[tokio::test]
    async fn test_repository_without_markdown_downloads_nothing() {
        let server = MockServer::start().await;
        mount_json(&server, "/users/octo/repos", json!([
            {"name": "code", "full_name": "octo/code", "owner": {"login": "octo"}}
        ])).await;
        mount_json(&server, "/repos/octo/code/contents", json!([
            file_json(&server, "main.rs")
        ])).await;
        Mock::given(method("GET"))
            .and(path("/raw/main.rs"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let harvester = harvester_for(&server, tmp.path().to_path_buf());
        let report = harvester.run("octo").await.unwrap();

        assert_eq!(report.repositories[0].discovered, 0);
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_unreadable_repository_does_not_stop_the_run() {
        let server = MockServer::start().await;
        mount_json(&server, "/users/octo/repos", json!([
            {"name": "empty", "full_name": "octo/empty", "owner": {"login": "octo"}},
            {"name": "docs", "full_name": "octo/docs", "owner": {"login": "octo"}}
        ])).await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/empty/contents"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "This repository is empty."})))
            .mount(&server)
            .await;
        mount_json(&server, "/repos/octo/docs/contents", json!([
            file_json(&server, "README.md")
        ])).await;
        mount_raw(&server, "/raw/README.md", 200, "readme").await;

        let tmp = tempfile::tempdir().unwrap();
        let harvester = harvester_for(&server, tmp.path().to_path_buf());
        let report = harvester.run("octo").await.unwrap();

        assert_eq!(report.unreadable_count(), 1);
        assert!(report.repositories[0]
            .listing_error
            .as_deref()
            .unwrap()
            .contains("This repository is empty."));
        assert!(tmp.path().join("docs_1.md").exists());
    }

    #[tokio::test]
    async fn test_listing_failure_is_returned() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/ghost/repos"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let harvester = harvester_for(&server, tmp.path().to_path_buf());
        let err = harvester.run("ghost").await.unwrap_err();

        assert!(matches!(err, HarvestError::UserNotFound(_)));
    }

    #[test]
    fn test_report_json_omits_missing_listing_error() {
        let report = RunReport {
            username: "octo".to_string(),
            repositories: vec![RepoReport {
                name: "docs".to_string(),
                discovered: 1,
                downloaded: vec![PathBuf::from("out/docs_1.md")],
                failures: Vec::new(),
                listing_error: None,
            }],
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["repositories"][0]["downloaded"][0], "out/docs_1.md");
        assert!(value["repositories"][0].get("listing_error").is_none());
    }
}

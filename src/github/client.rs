// src/github/client.rs
// =============================================================================
// A small client for the two GitHub REST endpoints we need.
//
// Endpoints:
// - GET /users/{user}/repos               (paginated, 100 per page)
// - GET /repos/{owner}/{repo}/contents/{path}
//
// The client owns a single reqwest::Client. The downloader borrows it as
// well, so one connection pool serves the whole run.
//
// Rust concepts:
// - async functions: For network I/O
// - Generics with trait bounds: get_json::<T>() decodes any payload type
// - Result with a custom error enum: callers can match on what went wrong
// =============================================================================

use crate::config::Config;
use crate::error::HarvestError;
use crate::github::types::{Repository, TreeEntry};
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("md-harvest/", env!("CARGO_PKG_VERSION"));
const GITHUB_JSON: &str = "application/vnd.github+json";

/// Page size for repository listings (the API maximum)
const PER_PAGE: usize = 100;

#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_base: Url,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self, HarvestError> {
        // GitHub rejects requests without a User-Agent
        let http = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http,
            api_base: config.api_base.clone(),
            token: config.token.clone(),
        })
    }

    /// The underlying HTTP client, shared with the downloader
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Lists every repository owned by `username`, following pagination.
    ///
    /// `Ok(vec![])` means the user exists and has no repositories; a missing
    /// user is `HarvestError::UserNotFound`.
    pub async fn list_repositories(&self, username: &str) -> Result<Vec<Repository>, HarvestError> {
        let mut repositories = Vec::new();
        let mut page = 1u32;

        loop {
            let mut url = self.endpoint(["users", username, "repos"])?;
            url.query_pairs_mut()
                .append_pair("per_page", &PER_PAGE.to_string())
                .append_pair("page", &page.to_string());

            let batch: Vec<Repository> = match self.get_json(url).await {
                Ok(batch) => batch,
                Err(HarvestError::Api { status: 404, .. }) => {
                    return Err(HarvestError::UserNotFound(username.to_string()));
                }
                Err(e) => return Err(e),
            };

            // A short page is the last one
            let last_page = batch.len() < PER_PAGE;
            repositories.extend(batch);
            if last_page {
                break;
            }
            page += 1;
        }

        debug!(username, count = repositories.len(), "Listed repositories");
        Ok(repositories)
    }

    /// Lists the entries of one directory. `""` is the repository root.
    pub async fn list_contents(&self, repo: &Repository, path: &str) -> Result<Vec<TreeEntry>, HarvestError> {
        let mut url = self.endpoint([
            "repos",
            repo.owner.login.as_str(),
            repo.name.as_str(),
            "contents",
        ])?;
        url.path_segments_mut()
            .map_err(|_| HarvestError::InvalidApiUrl(self.api_base.to_string()))?
            .extend(path.split('/').filter(|segment| !segment.is_empty()));

        self.get_json(url).await
    }

    // Appends encoded path segments to the API base, keeping any prefix
    // such as /api/v3 on GitHub Enterprise.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, HarvestError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| HarvestError::InvalidApiUrl(self.api_base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, HarvestError> {
        debug!(%url, "GET");

        let response = self
            .authorize(self.http.get(url.clone()))
            .header(header::ACCEPT, GITHUB_JSON)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_for_status(&url, response).await);
        }

        Ok(response.json::<T>().await?)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// GitHub error bodies look like `{"message": "Not Found", "documentation_url": ...}`
#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

// Turns a non-success response into a HarvestError
//
// 403 and 429 only mean "rate limited" when the quota header says so;
// otherwise they are ordinary API errors (e.g. a blocked repository).
async fn error_for_status(url: &Url, response: Response) -> HarvestError {
    let status = response.status();

    let quota_exhausted = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        == Some("0");

    if quota_exhausted && matches!(status, StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS) {
        return HarvestError::RateLimited;
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|b| b.message)
        .unwrap_or(body);

    HarvestError::Api {
        url: url.to_string(),
        status: status.as_u16(),
        message,
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why path_segments_mut() instead of format!()?
//    - Usernames and file paths can contain spaces or other special characters
//    - path_segments_mut() percent-encodes each segment for us
//    - pop_if_empty() drops the trailing "/" of a base like https://api.github.com/
//
// 2. What does `Err(HarvestError::Api { status: 404, .. })` do?
//    - It matches only API errors whose status field equals 404
//    - `..` ignores the remaining fields
//    - Every other error falls through to the next match arm
//
// 3. Why is get_json generic?
//    - The same request/decode/error logic serves both endpoints
//    - The caller picks T (Vec<Repository> or Vec<TreeEntry>)
//    - DeserializeOwned means T can be built from JSON without borrowing it
// -----------------------------------------------------------------------------

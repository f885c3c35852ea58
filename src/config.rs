// src/config.rs
// =============================================================================
// Run configuration.
//
// Everything the components need to know about their environment is
// collected here once, from the parsed CLI (which already folded in
// GITHUB_TOKEN / GITHUB_API_URL and the .env file), and handed to each
// component when it is constructed.
// =============================================================================

use crate::cli::Cli;
use std::path::PathBuf;
use tracing::debug;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    /// Where `<repo>_<n>.md` files are written
    pub output_dir: PathBuf,
    /// Bearer token for API calls; `None` means unauthenticated
    pub token: Option<String>,
    /// Base URL of the REST API
    pub api_base: Url,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        let token = cli
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        let config = Self {
            output_dir: cli.output_dir.clone(),
            token,
            api_base: cli.api_url.clone(),
        };

        debug!(
            output_dir = %config.output_dir.display(),
            api_base = %config.api_base,
            authenticated = config.token.is_some(),
            "Loaded config"
        );
        config
    }
}

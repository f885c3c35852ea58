// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The only thing we really need is a GitHub username. It can be passed as a
// positional argument; if it isn't, we fall back to asking for it on stdin.
// Everything else has a sensible default.
//
// Rust concepts:
// - Derive macros: clap generates the parser from the struct definition
// - Option<T>: for arguments that may be missing
// - Generic I/O: the prompt works with any reader/writer, so it is testable
// =============================================================================

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use url::Url;

/// Default directory the Markdown files are written to
pub const DEFAULT_OUTPUT_DIR: &str = "downloaded_markdowns";

/// Public GitHub REST API
pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Parser, Debug)]
#[command(
    name = "md-harvest",
    version = "0.1.0",
    about = "Download every Markdown file from a GitHub user's repositories",
    long_about = "md-harvest lists all repositories of a GitHub user, walks each repository's \
                  file tree and saves every .md file as <repo>_<n>.md in a local directory."
)]
pub struct Cli {
    /// GitHub username whose repositories are harvested
    ///
    /// When omitted, the username is read interactively from stdin.
    pub username: Option<String>,

    /// Directory the Markdown files are written to (created if missing)
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// GitHub API token, raises the rate limit and grants private repos
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the GitHub REST API (GitHub Enterprise: https://host/api/v3)
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: Url,

    /// Print the run report as JSON once all repositories are processed
    #[arg(long)]
    pub json: bool,

    /// Show debug diagnostics (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Asks for a username and reads one line.
///
/// Returns `None` when the trimmed answer is empty (or stdin is closed).
pub fn prompt_username<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<Option<String>> {
    write!(output, "Enter the GitHub username: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    Ok(normalize_username(&line))
}

/// Trims a username and turns blank input into `None`
pub fn normalize_username(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["md-harvest", "octocat"]).unwrap();
        assert_eq!(cli.username.as_deref(), Some("octocat"));
        assert_eq!(cli.output_dir, PathBuf::from("downloaded_markdowns"));
        assert!(!cli.json);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_username_is_optional() {
        let cli = Cli::try_parse_from(["md-harvest"]).unwrap();
        assert!(cli.username.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "md-harvest",
            "octocat",
            "--output-dir",
            "/tmp/md",
            "--api-url",
            "https://ghe.example.com/api/v3",
            "--token",
            "abc",
            "--json",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.output_dir, PathBuf::from("/tmp/md"));
        assert_eq!(cli.api_url.host_str(), Some("ghe.example.com"));
        assert_eq!(cli.token.as_deref(), Some("abc"));
        assert!(cli.json);
        assert!(cli.verbose);
    }

    #[test]
    fn test_invalid_api_url_rejected() {
        let result = Cli::try_parse_from(["md-harvest", "--api-url", "not a url"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_prompt_reads_and_trims() {
        let mut out = Vec::new();
        let name = prompt_username(Cursor::new("  octocat \n"), &mut out).unwrap();
        assert_eq!(name.as_deref(), Some("octocat"));
        assert_eq!(String::from_utf8(out).unwrap(), "Enter the GitHub username: ");
    }

    #[test]
    fn test_prompt_empty_input() {
        let name = prompt_username(Cursor::new("\n"), Vec::new()).unwrap();
        assert!(name.is_none());

        let name = prompt_username(Cursor::new(""), Vec::new()).unwrap();
        assert!(name.is_none());
    }
}

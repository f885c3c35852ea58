// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Load .env, parse command-line arguments, set up logging
// 2. Create the output directory if it doesn't exist yet
// 3. Get a username (argument or interactive prompt)
// 4. Run the harvest pipeline and print a summary
// 5. Exit with a proper code (0 = run finished, 2 = could not even start)
//
// Individual failures (unknown user, unreadable repository, broken download)
// are reported but never change the exit code.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing and the username prompt
mod config;        // src/config.rs - run configuration
mod error;         // src/error.rs - typed errors
mod github;        // src/github/ - GitHub REST API client
mod harvest;       // src/harvest/ - finder, downloader and the pipeline
mod logging;       // src/logging.rs - tracing setup

use clap::Parser;
use cli::Cli;
use config::Config;
use github::GitHubClient;
use harvest::{Harvester, RunReport};

use anyhow::{Context, Result};

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = run finished (possibly with per-item failures)
//   Err   = setup failed, mapped to exit code 2
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::from_cli(&cli);

    let created = harvest::ensure_output_dir(&config.output_dir).with_context(|| {
        format!("could not create output directory {}", config.output_dir.display())
    })?;
    if created {
        println!("Created output directory: {}", config.output_dir.display());
    }

    let username = match cli.username.as_deref() {
        Some(name) => cli::normalize_username(name),
        None => {
            let stdin = std::io::stdin();
            cli::prompt_username(stdin.lock(), std::io::stdout()).context("could not read username")?
        }
    };

    let Some(username) = username else {
        println!("No username provided. Exiting.");
        return Ok(0);
    };

    let client = GitHubClient::new(&config).context("could not build HTTP client")?;
    let harvester = Harvester::new(client, config.output_dir.clone());

    let report = match harvester.run(&username).await {
        Ok(report) => report,
        Err(e) => {
            println!("{}", e);
            println!("No repositories fetched due to a previous error.");
            return Ok(0);
        }
    };

    print_summary(&report);

    if cli.json {
        let json_output = serde_json::to_string_pretty(&report)?;
        println!("{}", json_output);
    }

    Ok(0)
}

// Prints one line per repository followed by totals
fn print_summary(report: &RunReport) {
    if report.repositories.is_empty() {
        return;
    }

    println!();
    println!("{:<40} {:>10} {:>12} {:>8}", "REPOSITORY", "FOUND", "DOWNLOADED", "FAILED");
    println!("{}", "=".repeat(73));

    for repo in &report.repositories {
        // Truncate long names so the columns stay aligned
        let name = if repo.name.chars().count() > 37 {
            format!("{}...", repo.name.chars().take(37).collect::<String>())
        } else {
            repo.name.clone()
        };
        let found = match &repo.listing_error {
            Some(_) => "error".to_string(),
            None => repo.discovered.to_string(),
        };

        println!(
            "{:<40} {:>10} {:>12} {:>8}",
            name,
            found,
            repo.downloaded.len(),
            repo.failures.len()
        );
    }

    println!();
    println!("📊 Summary for '{}':", report.username);
    println!("   📁 Repositories: {}", report.repositories.len());
    println!("   ✅ Downloaded: {}", report.downloaded_count());
    println!("   ❌ Failed: {}", report.failed_count());
    if report.unreadable_count() > 0 {
        println!("   ⚠️  Unreadable repositories: {}", report.unreadable_count());
    }
}

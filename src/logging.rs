// src/logging.rs
// =============================================================================
// Sets up `tracing` output.
//
// Diagnostics (failed listings, skipped files, request traces) go through
// tracing; progress lines stay plain println! in the pipeline.
// RUST_LOG wins over --verbose when both are present.
// =============================================================================

use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("md_harvest={}", default_level)));

    // try_init: a second call (tests) must not panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

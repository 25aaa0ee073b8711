//! Tracing setup for the command-line tools.
//!
//! Events go to stderr so that stdout stays reserved for command output.
//! `RUST_LOG` overrides the `--log-level` flag when set.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Initialises the global tracing subscriber at the requested level.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
pub fn init(log_level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise tracing: {e}"))
}

//! Logging for tltctl
//!
//! Diagnostics go to stderr through tracing so stdout stays reserved for the
//! status channel the editor plugin reads.
//!
//! Filter priority:
//! 1. --verbose (debug)
//! 2. $TLT_LOG (EnvFilter directives)
//! 3. warn

use tracing_subscriber::EnvFilter;

/// Environment variable holding filter directives
pub const LOG_ENV: &str = "TLT_LOG";

fn build_env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber (no-op if one is already set)
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

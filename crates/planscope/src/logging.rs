//! Tracing subscriber setup for the binary
//!
//! The library only emits events; installing a subscriber is left to
//! whoever embeds it.

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured level
pub const LOG_ENV: &str = "PLANSCOPE_LOG";

/// Builds the filter: `PLANSCOPE_LOG` when set and valid, else `default_level`
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Installs a formatted subscriber writing to stderr
///
/// A second call is a no-op.
pub fn init_tracing(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

//! Logging setup
//!
//! Filter precedence: `QUERYGATE_LOG`, then `RUST_LOG`, then the config's
//! `log_filter`. Logs go to stderr so stdout stays JSON-only for the CLI.

use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter
pub const ENV_LOG: &str = "QUERYGATE_LOG";

/// Picks the effective filter directive
pub fn resolve_filter(default_filter: &str) -> String {
    std::env::var(ENV_LOG)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| default_filter.to_string())
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_new(resolve_filter(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .compact()
        .with_env_filter(filter)
        .try_init();
}

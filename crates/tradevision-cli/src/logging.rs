//! stderr tracing setup. stdout is reserved for command output.

use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

/// Environment variable that overrides `--log-level` with a full filter
/// directive, e.g. `TRADEVISION_LOG=tradevision_core=debug`.
pub const LOG_ENV: &str = "TRADEVISION_LOG";

pub fn init(level: LogLevel) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

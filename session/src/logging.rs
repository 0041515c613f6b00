//! Logging setup.

use tracing_subscriber::EnvFilter;

use crate::config::SessionConfig;

/// Install a global `fmt` subscriber driven by `filter`.
///
/// An unparsable directive falls back to `info`. Returns false if a global
/// subscriber was already installed.
pub fn init(filter: &str) -> bool {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Install the subscriber using the configured `log_filter` directive.
pub fn init_from(config: &SessionConfig) -> bool {
    init(&config.log_filter)
}

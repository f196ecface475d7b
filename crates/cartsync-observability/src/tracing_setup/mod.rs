//! Tracing setup: structured logging with per-operation event helpers.

pub mod events;

use cartsync_core::config::ObservabilityConfig;
use cartsync_core::constants::LOG_ENV_VAR;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber from config.
///
/// Respects the `CARTSYNC_LOG` environment variable for filtering and falls
/// back to `config.log_level`. Returns `false` if a global subscriber was
/// already installed.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if config.json_logs {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}

/// Initialize tracing with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .json()
        .try_init()
        .is_ok()
}

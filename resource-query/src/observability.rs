//! Structured logging setup

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Install the global JSON tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise `service.log_level` is used, falling
/// back to `info` when it does not parse. Returns `false` if a global
/// subscriber was already installed, which is harmless (tests call this
/// repeatedly).
pub fn init_tracing(config: &Config) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.service.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(true)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(
            environment = %config.service.environment,
            "Tracing initialized for service: {}",
            config.service.name
        );
    }
    installed
}

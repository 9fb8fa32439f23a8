//! Tracing subscriber setup.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// `RUST_LOG` when set, otherwise the configured level.
pub fn env_filter(config: &AppConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level))
}

/// Installs the global subscriber; `logging.format = "json"` selects JSON lines.
///
/// Fails when a global subscriber is already installed.
pub fn init_tracing(config: &AppConfig) -> Result<(), TryInitError> {
    let filter = env_filter(config);

    match config.logging.format.to_lowercase().as_str() {
        "json" => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    }
}

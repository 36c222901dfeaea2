//! Logger initialization.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_DIRECTIVE: &str = "dialtrace=debug";

#[derive(Debug, Error)]
pub enum InitError {
    #[error("Failed to initialize logger: {0}")]
    Logger(String),
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over [`DEFAULT_LOG_DIRECTIVE`], e.g.
/// `RUST_LOG=dialtrace=trace,hickory_proto=debug`.
///
/// # Errors
///
/// Returns `InitError::Logger` if a global subscriber is already set.
pub fn init_logging() -> Result<(), InitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| InitError::Logger(e.to_string()))
}

//! Surfacing load outcomes through `tracing`.
//!
//! The loader never logs on its own; hosts call [`report`] where they want
//! an outcome to show up.

use crate::outcome::Outcome;
use miette::{Result, miette};
use std::path::Path;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs a global fmt subscriber.
///
/// `RUST_LOG` wins over `level` when it is set. Fails if a global subscriber
/// is already installed.
pub fn init_logging(level: &str) -> Result<()> {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| miette!(code = "logging::init", "{e}"))
}

/// Emits one event describing `outcome`. The outcome itself is untouched.
pub fn report<T>(path: &Path, outcome: &Outcome<T>) {
    match outcome {
        Ok(_) => tracing::debug!(path = %path.display(), "config loaded"),
        Err(failure) => tracing::warn!(
            path = %path.display(),
            kind = %failure.kind(),
            reason = failure.message(),
            "config load failed"
        ),
    }
}

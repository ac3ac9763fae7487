// text-search/src/logging.rs
//! Process-wide `tracing` subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Installs a formatting subscriber filtered by `RUST_LOG`, falling back to
/// `default_filter`. Calling it again, or after the host application
/// installed its own subscriber, leaves the existing subscriber in place.
pub fn init(default_filter: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .map_err(|e| Error::Config(format!("invalid log filter '{default_filter}': {e}")))?,
    };

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed, keeping it");
    }
    Ok(())
}

//! Tracing subscriber initialisation.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// Configures an [`EnvFilter`] (from `RUST_LOG`, falling back to `log_level`)
/// and either a JSON or a human-readable [`fmt`] layer.
///
/// # Errors
///
/// Returns an error if `log_level` is not a valid filter or a global
/// subscriber is already installed.
pub fn init_logging(log_level: &str, json: bool) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level {log_level:?}"))?,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .try_init()
        .context("failed to initialise tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installs_once() {
        // The only test in this crate that touches the global subscriber.
        assert!(init_logging("debug", true).is_ok());
        assert!(init_logging("debug", false).is_err());
    }
}

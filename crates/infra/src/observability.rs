//! Logging initialisation
//!
//! Library code only emits `tracing` events; the host application decides
//! whether and how they are rendered by calling [`init_logging`] once.

use pocketledger_domain::{LedgerError, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "pocketledger=info,pocketledger_infra=info";

/// Output format for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Install a global fmt subscriber.
///
/// The level is taken from `RUST_LOG`, falling back to
/// [`DEFAULT_LOG_FILTER`]. Returns `false` without touching anything if a
/// global subscriber is already installed.
///
/// # Errors
///
/// Returns `LedgerError::Config` if `RUST_LOG` cannot be parsed.
pub fn init_logging(format: LogFormat) -> Result<bool> {
    let filter = create_env_filter()?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match format {
        LogFormat::Text => registry.with(fmt::layer().with_target(true)).try_init().is_ok(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true).with_span_list(false))
            .try_init()
            .is_ok(),
    };

    if installed {
        tracing::debug!(?format, "Logging initialised");
    }
    Ok(installed)
}

fn create_env_filter() -> Result<EnvFilter> {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives)
            .map_err(|e| LedgerError::Config(format!("Invalid log filter: {e}"))),
        _ => EnvFilter::try_new(DEFAULT_LOG_FILTER)
            .map_err(|e| LedgerError::Config(format!("Invalid log filter: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_a_no_op() {
        // Another test may have installed the subscriber already.
        let _ = init_logging(LogFormat::Text).unwrap();
        assert!(!init_logging(LogFormat::Json).unwrap());
    }

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }
}

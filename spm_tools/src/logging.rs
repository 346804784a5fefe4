//! Diagnostic logging for the command-line tools.
//!
//! Events go to standard error so they never mix with the settings report
//! on standard output. `RUST_LOG` selects the filter; without it only
//! warnings and errors are shown.

use tracing::warn;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::{Result, ToolError};

/// Filter used when `RUST_LOG` is unset, empty or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Builds the event filter from `directives`, using [`DEFAULT_FILTER`] when
/// they are absent or blank.
///
/// # Errors
///
/// Returns the [`ParseError`] for an invalid directive.
pub fn filter_from(directives: Option<&str>) -> Result<EnvFilter, ParseError> {
    match directives {
        Some(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives),
        _ => Ok(EnvFilter::new(DEFAULT_FILTER)),
    }
}

/// Installs the global subscriber.
///
/// An invalid `RUST_LOG` falls back to [`DEFAULT_FILTER`] with a warning, so
/// the logging environment never changes how a command line is handled.
///
/// # Errors
///
/// Returns [`ToolError::Logging`] when a global subscriber is already
/// installed.
pub fn init() -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (filter, rejected) = match filter_from(directives.as_deref()) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new(DEFAULT_FILTER), Some(err)),
    };
    let layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|err| ToolError::Logging(err.to_string()))?;
    if let Some(err) = rejected {
        warn!(
            error = %err,
            "ignoring invalid {}; using '{DEFAULT_FILTER}'",
            EnvFilter::DEFAULT_ENV
        );
    }
    Ok(())
}

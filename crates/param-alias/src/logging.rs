//! Tracing bootstrap for hosts that do not install their own subscriber

use tracing_subscriber::filter::{LevelFilter, ParseError};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Target under which [`TracingReporter`](crate::TracingReporter) logs
/// deprecation notices.
pub const DEPRECATION_TARGET: &str = "param_alias::deprecation";

/// Filter applied when `RUST_LOG` is unset.
///
/// Everything is logged at `default_level`, except deprecation notices which
/// stay visible at `warn` even when `default_level` is stricter.
pub fn default_filter(default_level: LevelFilter) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(format!("{default_level},{DEPRECATION_TARGET}=warn"))
}

/// Initialize a subscriber at `info`, honouring `RUST_LOG` when set.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_with(LevelFilter::INFO)
}

/// Initialize a subscriber whose fallback filter is
/// [`default_filter(default_level)`](default_filter).
///
/// Fails instead of panicking when a global subscriber is already set.
pub fn init_with(
    default_level: LevelFilter,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .compact();

    let filter_layer =
        EnvFilter::try_from_default_env().or_else(|_| default_filter(default_level))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!(%default_level, "Logging initialized");
    Ok(())
}

//! Tracing hooks for emission failures.
//!
//! Compiled to no-ops unless the `tracing` feature is enabled.

use std::fmt;

#[cfg(feature = "tracing")]
const LOGGER_TARGET: &str = "loglove::logger";

/// Traces the substitution of the fallback marker for a message or line.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_format_fallback(logger: &str, error: &dyn fmt::Display) {
    tracing::warn!(
        target: LOGGER_TARGET,
        logger = %logger,
        error = %error,
        "format_fallback"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_format_fallback(_logger: &str, _error: &dyn fmt::Display) {}

/// Traces a sink that refused a line.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_sink_failure(logger: &str, error: &dyn fmt::Display) {
    tracing::warn!(
        target: LOGGER_TARGET,
        logger = %logger,
        error = %error,
        "sink_write_failed"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_sink_failure(_logger: &str, _error: &dyn fmt::Display) {}

/// Traces a threshold change applied to a live logger.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_level_change(logger: &str, from: crate::Level, to: crate::Level) {
    tracing::debug!(
        target: LOGGER_TARGET,
        logger = %logger,
        from = %from,
        to = %to,
        "level_changed"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_level_change(_logger: &str, _from: crate::Level, _to: crate::Level) {}

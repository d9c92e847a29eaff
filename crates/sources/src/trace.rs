//! Tracing hooks for configuration providers.
//!
//! No-ops unless the `tracing` feature is enabled.

use std::path::Path;

#[cfg(feature = "tracing")]
const SOURCES_TARGET: &str = "loglove::sources";

/// Traces a configuration file that does not exist.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_file_missing(path: &Path) {
    tracing::debug!(
        target: SOURCES_TARGET,
        path = %path.display(),
        "config_file_missing"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_file_missing(_path: &Path) {}

/// Traces a command-line spec without `=`.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_spec_dropped(spec: &str) {
    tracing::warn!(
        target: SOURCES_TARGET,
        spec = %spec,
        "level_spec_dropped"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_spec_dropped(_spec: &str) {}

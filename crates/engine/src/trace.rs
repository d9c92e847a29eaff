//! Tracing hooks for the registry, reloads, and the watcher.
//!
//! Every function is an inline no-op unless the `tracing` feature is enabled.

use logging::Level;

use crate::controller::ReloadReport;
use crate::trigger::Trigger;

#[cfg(feature = "tracing")]
const RELOAD_TARGET: &str = "loglove::reload";

#[cfg(feature = "tracing")]
const REGISTRY_TARGET: &str = "loglove::registry";

// ============================================================================
// Registry
// ============================================================================

/// Traces the creation of a logger.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_logger_created(name: &str, level: Level) {
    tracing::trace!(
        target: REGISTRY_TARGET,
        name = %name,
        level = %level,
        "logger_created"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_logger_created(_name: &str, _level: Level) {}

// ============================================================================
// Reload
// ============================================================================

/// Traces a finished rebuild.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_reload_completed(report: &ReloadReport) {
    tracing::info!(
        target: RELOAD_TARGET,
        trigger = %report.trigger,
        generation = report.generation,
        rules = report.rules,
        dropped_rules = report.dropped_rules,
        loggers_updated = report.loggers_updated,
        failed_sources = report.failed_sources.len(),
        "reload_completed"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_reload_completed(_report: &ReloadReport) {}

/// Traces a request folded into a running reload.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_reload_coalesced(trigger: Trigger) {
    tracing::debug!(
        target: RELOAD_TARGET,
        trigger = %trigger,
        "reload_coalesced"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_reload_coalesced(_trigger: Trigger) {}

/// Traces a source treated as empty because it failed.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_source_failed(label: &str, error: &sources::SourceError) {
    tracing::warn!(
        target: RELOAD_TARGET,
        source = %label,
        error = %error,
        "source_failed"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_source_failed(_label: &str, _error: &sources::SourceError) {}

/// Traces a source treated as empty because it panicked.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_source_panicked(label: &str) {
    tracing::error!(
        target: RELOAD_TARGET,
        source = %label,
        "source_panicked"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_source_panicked(_label: &str) {}

// ============================================================================
// Watcher
// ============================================================================

/// Traces the watcher thread starting.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_watcher_started(interval: Option<std::time::Duration>, signals: bool) {
    tracing::debug!(
        target: RELOAD_TARGET,
        interval = ?interval,
        signals = signals,
        "watcher_started"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_watcher_started(_interval: Option<std::time::Duration>, _signals: bool) {}

/// Traces the watcher thread exiting.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_watcher_stopped() {
    tracing::debug!(target: RELOAD_TARGET, "watcher_stopped");
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) const fn trace_watcher_stopped() {}

/// Traces a failed SIGHUP handler installation.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_signal_install_failed(error: &std::io::Error) {
    tracing::warn!(
        target: RELOAD_TARGET,
        error = %error,
        "sighup_handler_install_failed"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_signal_install_failed(_error: &std::io::Error) {}

//! Tracing hooks for facade construction.

#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_watcher_unavailable(error: &std::io::Error) {
    tracing::warn!(
        target: "loglove::reload",
        error = %error,
        "watcher_unavailable"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_watcher_unavailable(_error: &std::io::Error) {}

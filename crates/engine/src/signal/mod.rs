//! SIGHUP as a reload trigger.
//!
//! The watcher compares [`hangup_count`] against the value it saw last; any
//! difference means at least one SIGHUP arrived and triggers one reload.
//! Several signals between two polls collapse into that single reload.
//!
//! Applications that manage signals themselves can skip
//! [`install_hangup_handler`] and call [`notify_hangup`] from their own
//! handler.
//!
//! # Safety
//!
//! Installing the handler uses unsafe libc calls. The handler itself only
//! increments an atomic counter, which is async-signal-safe.
//!
//! # Platform Support
//!
//! - **Unix**: SIGHUP through `sigaction`.
//! - **Other**: installation is a no-op; [`notify_hangup`] still works.

#![allow(unsafe_code)]

use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub use unix::install_hangup_handler;

#[cfg(not(unix))]
mod stub;
#[cfg(not(unix))]
pub use stub::install_hangup_handler;

/// Hangups observed since process start.
static HANGUP_COUNT: AtomicU64 = AtomicU64::new(0);

/// Records one hangup. Safe to call from a signal handler.
#[inline]
pub fn notify_hangup() {
    HANGUP_COUNT.fetch_add(1, Ordering::Release);
}

/// Number of hangups recorded so far.
#[inline]
#[must_use]
pub fn hangup_count() -> u64 {
    HANGUP_COUNT.load(Ordering::Acquire)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notify_increments_count() {
        let before = hangup_count();
        notify_hangup();
        assert!(hangup_count() > before);
    }
}

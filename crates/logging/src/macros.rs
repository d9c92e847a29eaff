//! crates/logging/src/macros.rs
//! Format-string emit macros.
//!
//! Each macro checks the logger's threshold before `format_args!` is built,
//! so neither interpolation nor the `Display` impls of the arguments run for
//! suppressed messages.

/// Emit a formatted message at an explicit level.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use logging::{Level, Logger, MemorySink, PlainFormatter};
///
/// let sink = Arc::new(MemorySink::new());
/// let logger = Logger::new("/jobs", Level::Info, Arc::new(PlainFormatter), sink.clone());
/// logging::log!(logger, Level::Info, "{} jobs queued", 3);
/// assert_eq!(sink.last().as_deref(), Some("INFO /jobs 3 jobs queued"));
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger.log(level, ::std::format_args!($($arg)+));
        }
    }};
}

/// Emit a formatted message at [`Level::Emergency`](crate::Level::Emergency).
#[macro_export]
macro_rules! emergency {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Emergency, $($arg)+)
    };
}

/// Emit a formatted message at [`Level::Alert`](crate::Level::Alert).
#[macro_export]
macro_rules! alert {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Alert, $($arg)+)
    };
}

/// Emit a formatted message at [`Level::Critical`](crate::Level::Critical).
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Critical, $($arg)+)
    };
}

/// Emit a formatted message at [`Level::Error`](crate::Level::Error).
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Emit a formatted message at [`Level::Warning`](crate::Level::Warning).
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warning, $($arg)+)
    };
}

/// Emit a formatted message at [`Level::Notice`](crate::Level::Notice).
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Notice, $($arg)+)
    };
}

/// Emit a formatted message at [`Level::Info`](crate::Level::Info).
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Emit a formatted message at [`Level::Debug`](crate::Level::Debug).
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use logging::{Level, Logger, MemorySink, PlainFormatter};
///
/// let sink = Arc::new(MemorySink::new());
/// let logger = Logger::new("/jobs", Level::Error, Arc::new(PlainFormatter), sink.clone());
/// logging::debug!(logger, "state: {:?}", vec![1, 2, 3]);
/// assert!(sink.is_empty());
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

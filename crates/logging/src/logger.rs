//! crates/logging/src/logger.rs
//! Named logger handles with a live threshold.

use std::fmt;
use std::sync::Arc;

use crate::format::{Formatter, Record};
use crate::levels::{AtomicLevel, Level};
use crate::message::{FORMAT_FAILURE_MARKER, LogMessage, guard, render_guarded};
use crate::sink::Sink;
use crate::trace::{trace_format_fallback, trace_level_change, trace_sink_failure};

/// Handle bound to one logger name.
///
/// The name, formatter and sink are fixed at construction. Only the
/// threshold changes, through [`apply_level`](Self::apply_level), which the
/// reload path calls on the same instance callers already hold.
///
/// Emission never fails from the caller's point of view: a producer or
/// formatter that errors or panics is replaced by
/// [`FORMAT_FAILURE_MARKER`], and sink errors are dropped.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use logging::{Level, Logger, MemorySink, PlainFormatter};
///
/// let sink = Arc::new(MemorySink::new());
/// let logger = Logger::new("/app/db", Level::Warning, Arc::new(PlainFormatter), sink.clone());
///
/// logger.error("connection lost");
/// logger.debug(|| -> String { unreachable!("never rendered below the threshold") });
///
/// assert_eq!(sink.lines(), vec!["ERROR /app/db connection lost".to_owned()]);
/// ```
pub struct Logger {
    name: String,
    level: AtomicLevel,
    formatter: Arc<dyn Formatter>,
    sink: Arc<dyn Sink>,
}

impl Logger {
    /// Creates a logger.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        level: Level,
        formatter: Arc<dyn Formatter>,
        sink: Arc<dyn Sink>,
    ) -> Self {
        Self {
            name: name.into(),
            level: AtomicLevel::new(level),
            formatter,
            sink,
        }
    }

    /// The logger's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current threshold.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level.load()
    }

    /// Reports whether a message at `level` would be emitted right now.
    #[inline]
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        self.level.load().permits(level)
    }

    /// Replaces the threshold and returns the previous one.
    ///
    /// This is the reload path; application code normally changes levels
    /// through configuration instead.
    pub fn apply_level(&self, level: Level) -> Level {
        let previous = self.level.swap(level);
        if previous != level {
            trace_level_change(&self.name, previous, level);
        }
        previous
    }

    /// Emits `message` at `level` if the threshold permits it.
    ///
    /// The message is rendered only after the check passes. Returns whether
    /// a line was handed to the sink.
    pub fn log<M: LogMessage>(&self, level: Level, message: M) -> bool {
        if !self.enabled(level) {
            return false;
        }

        let body = render_guarded(message).unwrap_or_else(|error| {
            trace_format_fallback(&self.name, &error);
            FORMAT_FAILURE_MARKER.to_owned()
        });
        let record = Record::new(&self.name, level, &body);
        let line = guard("formatter", || self.formatter.format(&record)).unwrap_or_else(|error| {
            trace_format_fallback(&self.name, &error);
            format!("{level} [{}] {FORMAT_FAILURE_MARKER}", self.name)
        });

        match guard("sink", || Ok(self.sink.write_line(&line))) {
            Ok(Ok(())) => {}
            Ok(Err(error)) => trace_sink_failure(&self.name, &error),
            Err(error) => trace_sink_failure(&self.name, &error),
        }
        true
    }

    /// Emits at [`Level::Emergency`].
    pub fn emergency<M: LogMessage>(&self, message: M) -> &Self {
        self.log(Level::Emergency, message);
        self
    }

    /// Emits at [`Level::Alert`].
    pub fn alert<M: LogMessage>(&self, message: M) -> &Self {
        self.log(Level::Alert, message);
        self
    }

    /// Emits at [`Level::Critical`].
    pub fn critical<M: LogMessage>(&self, message: M) -> &Self {
        self.log(Level::Critical, message);
        self
    }

    /// Emits at [`Level::Error`].
    pub fn error<M: LogMessage>(&self, message: M) -> &Self {
        self.log(Level::Error, message);
        self
    }

    /// Emits at [`Level::Warning`].
    pub fn warning<M: LogMessage>(&self, message: M) -> &Self {
        self.log(Level::Warning, message);
        self
    }

    /// Alias for [`warning`](Self::warning).
    pub fn warn<M: LogMessage>(&self, message: M) -> &Self {
        self.warning(message)
    }

    /// Emits at [`Level::Notice`].
    pub fn notice<M: LogMessage>(&self, message: M) -> &Self {
        self.log(Level::Notice, message);
        self
    }

    /// Emits at [`Level::Info`].
    pub fn info<M: LogMessage>(&self, message: M) -> &Self {
        self.log(Level::Info, message);
        self
    }

    /// Emits at [`Level::Debug`].
    pub fn debug<M: LogMessage>(&self, message: M) -> &Self {
        self.log(Level::Debug, message);
        self
    }
}

impl fmt::Display for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level(), self.name)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .finish_non_exhaustive()
    }
}

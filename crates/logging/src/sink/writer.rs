//! crates/logging/src/sink/writer.rs
//!
//! Sink over any `io::Write` destination.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use super::Sink;
use crate::line_mode::LineMode;

/// [`Sink`] that streams lines into an [`io::Write`] target.
///
/// The writer sits behind a mutex so concurrent loggers never interleave
/// partial lines. Each line is followed by a newline unless the sink was
/// built with [`LineMode::WithoutNewline`].
///
/// # Examples
///
/// ```
/// use logging::{LineMode, Sink, WriterSink};
///
/// let sink = WriterSink::new(Vec::new());
/// sink.write_line("first")?;
/// sink.write_line("second")?;
/// assert_eq!(sink.into_inner(), b"first\nsecond\n".to_vec());
///
/// let sink = WriterSink::with_line_mode(Vec::new(), LineMode::WithoutNewline);
/// sink.write_line("raw")?;
/// assert_eq!(sink.into_inner(), b"raw".to_vec());
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct WriterSink<W> {
    writer: Mutex<W>,
    line_mode: LineMode,
}

impl<W> WriterSink<W> {
    /// Creates a sink that appends a newline after each line.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_line_mode(writer, LineMode::WithNewline)
    }

    /// Creates a sink with the provided [`LineMode`].
    #[must_use]
    pub fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self {
            writer: Mutex::new(writer),
            line_mode,
        }
    }

    /// Returns the configured [`LineMode`].
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl WriterSink<io::Stdout> {
    /// Sink writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl WriterSink<io::Stderr> {
    /// Sink writing to standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W> Sink for WriterSink<W>
where
    W: Write + Send,
{
    fn write_line(&self, line: &str) -> io::Result<()> {
        // a panic mid-write leaves at worst a partial line behind
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(line.as_bytes())?;
        writer.write_all(self.line_mode.terminator())?;
        writer.flush()
    }
}

impl<W> fmt::Debug for WriterSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink")
            .field("line_mode", &self.line_mode)
            .finish_non_exhaustive()
    }
}

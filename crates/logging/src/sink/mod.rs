//! Destinations for formatted lines.
//!
//! A [`Sink`] is shared by every logger of one configuration instance and is
//! called concurrently, so implementations synchronise internally.
//! [`WriterSink`] serialises writes to any [`std::io::Write`] behind a mutex;
//! [`MemorySink`] keeps lines in memory for inspection.

use std::io;

mod memory;
mod writer;

pub use memory::MemorySink;
pub use writer::WriterSink;

/// Write capability for formatted lines.
pub trait Sink: Send + Sync {
    /// Writes one formatted line (without a trailing newline).
    fn write_line(&self, line: &str) -> io::Result<()>;
}

impl<F> Sink for F
where
    F: Fn(&str) -> io::Result<()> + Send + Sync,
{
    fn write_line(&self, line: &str) -> io::Result<()> {
        self(line)
    }
}

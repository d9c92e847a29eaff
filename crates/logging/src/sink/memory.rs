//! crates/logging/src/sink/memory.rs
//!
//! In-memory sink that keeps every line.

use std::io;
use std::sync::{Mutex, PoisonError};

use super::Sink;

/// [`Sink`] that records every line in memory.
///
/// Handy when the emitted output itself is the thing under test.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded lines, oldest first.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Removes and returns the recorded lines.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lock())
    }

    /// Returns the most recently recorded line.
    #[must_use]
    pub fn last(&self) -> Option<String> {
        self.lock().last().cloned()
    }

    /// Number of recorded lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Sink for MemorySink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        self.lock().push(line.to_owned());
        Ok(())
    }
}

//! crates/logging/src/error.rs
//!
//! Errors for level parsing and message formatting.

use thiserror::Error;

/// Error returned when a string is not a recognised level name.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("unknown log level '{name}'")]
pub struct ParseLevelError {
    name: String,
}

impl ParseLevelError {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_owned(),
        }
    }

    /// Returns the rejected name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Failure while turning a message into an output line.
///
/// Never surfaces to callers of the emit operations; the logger substitutes
/// [`FORMAT_FAILURE_MARKER`](crate::FORMAT_FAILURE_MARKER) and carries on.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum FormatError {
    /// A deferred producer returned an error.
    #[error("message producer failed: {0}")]
    Producer(String),
    /// The formatter rejected the record.
    #[error("formatter failed: {0}")]
    Formatter(String),
    /// Producer, formatter, or sink panicked.
    #[error("{stage} panicked")]
    Panicked {
        /// Which step of emission panicked.
        stage: &'static str,
    },
}

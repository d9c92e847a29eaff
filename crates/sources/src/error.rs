//! crates/sources/src/error.rs
//!
//! Errors raised while acquiring a source.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A source that could not supply a mapping.
///
/// The reload path treats the source as empty for that cycle.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The configuration file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The configuration file looks like JSON but does not parse as an
    /// object of strings.
    #[error("malformed JSON in {}: {source}", path.display())]
    Json {
        /// File that failed.
        path: PathBuf,
        /// Parser diagnostic.
        #[source]
        source: serde_json::Error,
    },
}

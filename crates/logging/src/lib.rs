#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging/src/lib.rs
//!
//! # Overview
//!
//! `logging` holds the emitting half of loglove: the ordered [`Level`]
//! enumeration, the [`Logger`] handle bound to a name and a live threshold,
//! and the capabilities a logger is built from, a [`Formatter`] producing the
//! final line and a [`Sink`] receiving it.
//!
//! # Design
//!
//! - [`Level`] is a syslog-style ordinal enum (`Off` .. `Debug`); higher means
//!   more verbose and comparisons are always by ordinal.
//! - [`Logger`] keeps its threshold in an [`AtomicLevel`] so the reload path
//!   can change it in place while other threads emit.
//! - Emit operations accept any [`LogMessage`]: literal text, `format_args!`
//!   output, or a deferred producer closure. The threshold check happens
//!   before any of them is rendered.
//!
//! # Invariants
//!
//! - A message at [`Level::Off`] is never emitted, and a logger at `Off`
//!   emits nothing.
//! - Deferred producers run at most once, and only when the message is emitted.
//! - Emission never panics or returns an error to the caller. Failed
//!   rendering or formatting becomes [`FORMAT_FAILURE_MARKER`]; sink errors
//!   are dropped.
//!
//! # Errors
//!
//! [`ParseLevelError`] is the only error returned by a public function
//! ([`Level::from_str`](std::str::FromStr::from_str)). [`FormatError`] describes
//! rendering failures that the logger absorbs.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use logging::{Level, Logger, MemorySink, PlainFormatter};
//!
//! let sink = Arc::new(MemorySink::new());
//! let log = Logger::new("/susie/queue", Level::Info, Arc::new(PlainFormatter), sink.clone());
//!
//! log.error("we had an error in susie q!");
//! logging::info!(log, "{} items pending", 12);
//! log.debug(|| format!("queue dump: {:?}", [1, 2, 3]));
//!
//! assert_eq!(
//!     sink.lines(),
//!     vec![
//!         "ERROR /susie/queue we had an error in susie q!".to_owned(),
//!         "INFO /susie/queue 12 items pending".to_owned(),
//!     ]
//! );
//! ```
//!
//! # See also
//!
//! - `rules` for resolving a logger name to its configured level.
//! - `engine` for the registry that hands out loggers and updates them live.

mod error;
mod format;
mod levels;
mod line_mode;
mod logger;
mod macros;
mod message;
mod sink;
mod trace;

pub use error::{FormatError, ParseLevelError};
pub use format::{Formatter, PlainFormatter, Record, TimestampFormatter};
pub use levels::{AtomicLevel, Level};
pub use line_mode::LineMode;
pub use logger::Logger;
pub use message::{FORMAT_FAILURE_MARKER, LogMessage, MessageBody};
pub use sink::{MemorySink, Sink, WriterSink};

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! src/lib.rs
//!
//! # Overview
//!
//! loglove hands out named loggers whose verbosity is decided by glob
//! patterns over their names. Patterns come from any number of sources
//! (a configuration file, `LOGLOVE_*` environment variables, code, the
//! command line), and a reload re-reads them all and updates loggers that
//! callers already hold.
//!
//! # Design
//!
//! This crate is a thin facade. The work lives in the workspace members,
//! re-exported here:
//!
//! | Crate | Contents |
//! |-------|----------|
//! | [`logging`] | [`Level`], [`Logger`], formatters, sinks, emit macros |
//! | [`rules`] | pattern rules, precedence, [`ConfigSnapshot`] |
//! | [`sources`] | file, environment, code, and command-line providers |
//! | [`engine`] | logger registry, reload controller, watcher |
//!
//! # Invariants
//!
//! - One logger per (root-stripped) name for the life of a [`Loglove`].
//! - Emitting never blocks on a reload and never fails.
//! - A source that cannot be read counts as empty for that reload.
//!
//! # Examples
//!
//! ```
//! use loglove::{Level, Loglove, MapSource, MemorySink, PlainFormatter, RawMapping};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let loglove = Loglove::builder()
//!     .source(MapSource::new(
//!         RawMapping::level_to_patterns()
//!             .with_entry("INFO", "/susie/*")
//!             .with_entry("DEBUG", "/susie/queue"),
//!     ))
//!     .formatter(Arc::new(PlainFormatter))
//!     .sink(sink.clone())
//!     .build();
//!
//! let queue = loglove.log("/susie/queue");
//! let http = loglove.log("/susie/http");
//! queue.debug(|| format!("depth {}", 3));
//! http.debug("not shown");
//! loglove::info!(http, "{} requests", 12);
//!
//! assert_eq!(queue.level(), Level::Debug);
//! assert_eq!(
//!     sink.lines(),
//!     vec!["DEBUG /susie/queue depth 3".to_owned(), "INFO /susie/http 12 requests".to_owned()]
//! );
//! ```
//!
//! # See also
//!
//! - [`Options`] for the data half of the configuration.
//! - [`engine::signal`] for SIGHUP handling.

mod builder;
mod facade;
mod options;
mod trace;

pub use builder::LogloveBuilder;
pub use facade::Loglove;
pub use options::{Options, ROOT_PATH_ENV_VAR};

pub use engine::{self, ReloadOutcome, ReloadReport, ReloadState, Trigger};
pub use logging::{
    self, FORMAT_FAILURE_MARKER, Formatter, Level, Logger, MemorySink, PlainFormatter, Record,
    Sink, TimestampFormatter, WriterSink, alert, critical, debug, emergency, error, info, log,
    notice, warning,
};
pub use rules::{self, ConfigSnapshot, RawMapping, SourceKind, SourceRank};
pub use sources::{self, ArgsSource, EnvSource, FileSource, MapSource, SourceProvider};

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/engine/src/lib.rs
//!
//! # Overview
//!
//! The live half of loglove. [`Registry`] hands out one shared
//! [`Logger`](logging::Logger) per name; [`ReloadController`] owns the
//! published [`ConfigSnapshot`](rules::ConfigSnapshot) and, on every
//! reload, re-reads the sources and pushes new levels into loggers callers
//! already hold. [`Watcher`] drives reloads from a timer and SIGHUP.
//!
//! # Design
//!
//! - The registry is a `DashMap`; creation goes through the shard-locked
//!   entry API so a name never maps to two loggers.
//! - Snapshots are published through `arc-swap`. Emitting never touches a
//!   lock: a logger's level is a single atomic.
//! - Reloads are serialised by an in-flight flag. Concurrent requests are
//!   coalesced into one extra rebuild.
//! - The watcher is a plain thread stopped through a `crossbeam-channel`
//!   message. SIGHUP is observed through an atomic counter bumped by a
//!   `libc` signal handler (see [`signal`]).
//!
//! # Invariants
//!
//! - Logger identity never changes across reloads.
//! - A logger created while a reload is running ends up at the new
//!   snapshot's level.
//! - Source failures never abort a reload; the failed source counts as
//!   empty for that cycle.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use engine::{RankedSource, Registry, ReloadController};
//! use logging::{Level, MemorySink, PlainFormatter};
//! use sources::EnvSource;
//!
//! let sink = Arc::new(MemorySink::new());
//! let controller = ReloadController::new(
//!     vec![RankedSource::with_default_rank(EnvSource::from_vars([
//!         ("LOGLOVE_INFO", "/app/**"),
//!     ]))],
//!     Registry::new(Arc::new(PlainFormatter), sink.clone()),
//!     Level::Error,
//! );
//! controller.reload();
//!
//! let log = controller.logger("/app/http/server");
//! log.info("listening");
//! log.debug("not shown");
//! assert_eq!(sink.lines(), vec!["INFO /app/http/server listening".to_owned()]);
//! ```

mod controller;
mod registry;
pub mod signal;
mod trace;
mod trigger;
mod watcher;

pub use controller::{RankedSource, ReloadController, ReloadOutcome, ReloadReport, ReloadState};
pub use registry::{DEFAULT_LOGGER_NAME, Registry};
pub use trigger::Trigger;
pub use watcher::{DEFAULT_SIGNAL_POLL, WatchConfig, Watcher};

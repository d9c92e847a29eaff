#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/sources/src/lib.rs
//!
//! # Overview
//!
//! Configuration providers for loglove. Each provider implements
//! [`SourceProvider`] and turns its origin into a
//! [`RawMapping`](rules::RawMapping) whenever the engine reloads.
//!
//! | Provider | Kind | Origin |
//! |----------|------|--------|
//! | [`FileSource`] | file | `LOGLOVE_CONFIG`, default `love.config` |
//! | [`MapSource`] | code | a mapping held in memory |
//! | [`EnvSource`] | environment | `LOGLOVE_<LEVEL>` variables |
//! | [`ArgsSource`] | command line | repeated `--log-level LEVEL=PATTERNS` |
//!
//! # Design
//!
//! Providers only read and split text. Level names and patterns are
//! validated later, when `rules` normalises the mapping, so a provider never
//! rejects a whole source over one bad entry.
//!
//! # Errors
//!
//! [`SourceError`] is returned when a file exists but cannot be read or is
//! malformed JSON. A missing file is not an error. The engine treats a
//! failed source as empty for that reload.
//!
//! # Examples
//!
//! ```
//! use logging::Level;
//! use rules::ConfigSnapshot;
//! use sources::{EnvSource, SourceProvider};
//!
//! let env = EnvSource::from_vars([("LOGLOVE_INFO", "/web/*")]);
//! let snapshot = ConfigSnapshot::builder()
//!     .add(env.kind().default_rank(), &env.acquire().unwrap())
//!     .build();
//! assert_eq!(snapshot.resolve("/web/router"), Level::Info);
//! ```

mod args;
mod env;
mod error;
mod file;
mod map;
mod provider;
mod trace;

pub use args::{ArgsSource, LOG_LEVEL_ARG};
pub use env::{ENV_PREFIX, EnvSource};
pub use error::SourceError;
pub use file::{CONFIG_ENV_VAR, DEFAULT_CONFIG_PATH, FileSource};
pub use map::MapSource;
pub use provider::SourceProvider;

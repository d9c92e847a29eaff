#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/rules/src/lib.rs
//!
//! # Overview
//!
//! `rules` turns the string mappings supplied by configuration sources into
//! an immutable [`ConfigSnapshot`] and answers the one question the engine
//! asks of it: which [`Level`](logging::Level) applies to a logger name.
//!
//! # Design
//!
//! - A [`RawMapping`] is what a source hands over, in either orientation
//!   (`LEVEL -> patterns` or `pattern -> LEVEL`). Normalisation splits
//!   pattern lists on whitespace and yields one [`PatternRule`] per token.
//! - Each source contributes at a fixed [`SourceRank`]. The
//!   [`SnapshotBuilder`] merges all of them and compiles wildcard patterns
//!   with `globset`; literal patterns compare by string equality.
//! - [`ConfigSnapshot::resolve`] picks the winning rule by a composite key:
//!   source rank, literal over wildcard, literal segment count, then the
//!   more verbose level.
//!
//! # Invariants
//!
//! - `*` and `?` never match `/`; `**` matches across segments. Every other
//!   character matches itself, so a pattern always matches its own text.
//! - Resolution is deterministic and independent of rule insertion order.
//! - Building a snapshot never fails; rejected entries are reported through
//!   [`SnapshotBuilder::dropped`].
//!
//! # Errors
//!
//! [`RuleError`] describes a rejected configuration entry.
//!
//! # Examples
//!
//! ```
//! use logging::Level;
//! use rules::{ConfigSnapshot, RawMapping, SourceKind};
//!
//! let file = RawMapping::level_to_patterns()
//!     .with_entry("DEBUG", "/app/db/*")
//!     .with_entry("WARNING", "/app/**");
//!
//! let snapshot = ConfigSnapshot::builder()
//!     .add(SourceKind::File.default_rank(), &file)
//!     .build();
//!
//! assert_eq!(snapshot.resolve("/app/db/pool"), Level::Debug);
//! assert_eq!(snapshot.resolve("/app/web/router"), Level::Warning);
//! assert_eq!(snapshot.resolve("/other"), Level::Error);
//! ```
//!
//! # See also
//!
//! - `sources` for the providers that produce [`RawMapping`]s.
//! - `engine` for publishing snapshots and applying them to live loggers.

mod error;
mod mapping;
mod rank;
mod rule;
mod snapshot;
mod trace;

pub use error::RuleError;
pub use mapping::{Orientation, RawMapping};
pub use rank::{SourceKind, SourceRank};
pub use rule::PatternRule;
pub use snapshot::{ConfigSnapshot, SnapshotBuilder};

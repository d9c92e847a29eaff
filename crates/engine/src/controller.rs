//! crates/engine/src/controller.rs
//!
//! Snapshot ownership and the reload protocol.
//!
//! # Design
//!
//! The current [`ConfigSnapshot`] lives in an [`ArcSwap`]; readers take a
//! cheap guard and never block. A reload acquires every source, merges,
//! publishes the new snapshot, and only then walks the registry. Because
//! new loggers read the snapshot under the registry's shard lock, a logger
//! created during a reload either is visited by the walk or was created
//! from the new snapshot.
//!
//! # Invariants
//!
//! - At most one rebuild runs at a time. A request arriving during a rebuild
//!   returns [`ReloadOutcome::Coalesced`] and the running reload rebuilds
//!   once more before going idle, so the request is never lost. That
//!   rebuild reports the most recent trigger folded into it.
//! - A source that fails or panics counts as empty; a rebuild always
//!   completes and releases the in-flight flag.
//! - No lock touched by the emit path is held while sources are read.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering};

use arc_swap::ArcSwap;
use logging::{Level, Logger};
use rules::{ConfigSnapshot, SnapshotBuilder, SourceRank};
use sources::SourceProvider;

use crate::registry::Registry;
use crate::trace::{
    trace_reload_coalesced, trace_reload_completed, trace_source_failed, trace_source_panicked,
};
use crate::trigger::Trigger;

/// A provider paired with its fixed precedence.
pub struct RankedSource {
    rank: SourceRank,
    provider: Box<dyn SourceProvider>,
}

impl RankedSource {
    /// Pairs `provider` with `rank`.
    pub fn new<P: SourceProvider + 'static>(rank: SourceRank, provider: P) -> Self {
        Self {
            rank,
            provider: Box::new(provider),
        }
    }

    /// Pairs `provider` with the recommended rank for its kind.
    pub fn with_default_rank<P: SourceProvider + 'static>(provider: P) -> Self {
        Self::new(provider.kind().default_rank(), provider)
    }

    /// The source's rank.
    #[must_use]
    pub const fn rank(&self) -> SourceRank {
        self.rank
    }

    /// The provider.
    #[must_use]
    pub fn provider(&self) -> &dyn SourceProvider {
        self.provider.as_ref()
    }
}

impl fmt::Debug for RankedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RankedSource")
            .field("rank", &self.rank)
            .field("kind", &self.provider.kind())
            .field("label", &self.provider.label())
            .finish()
    }
}

/// Whether a rebuild is running.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReloadState {
    /// No rebuild in progress.
    Idle,
    /// A rebuild is acquiring sources or applying levels.
    Reloading,
}

/// Summary of one completed reload.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReloadReport {
    /// What requested the reload. A rebuild run on behalf of coalesced
    /// requests carries the latest of them.
    pub trigger: Trigger,
    /// Count of rebuilds completed since the controller was created,
    /// including this one.
    pub generation: u64,
    /// Rules in the published snapshot.
    pub rules: usize,
    /// Entries rejected during the merge.
    pub dropped_rules: usize,
    /// Live loggers whose level changed.
    pub loggers_updated: usize,
    /// Labels of sources that failed or panicked and were treated as empty.
    pub failed_sources: Vec<String>,
}

/// Result of a reload request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReloadOutcome {
    /// This call performed the rebuild.
    Completed(ReloadReport),
    /// Another reload was running; it will rebuild again on this request's
    /// behalf.
    Coalesced,
}

impl ReloadOutcome {
    /// The report, if this call performed the rebuild.
    #[must_use]
    pub const fn report(&self) -> Option<&ReloadReport> {
        match self {
            Self::Completed(report) => Some(report),
            Self::Coalesced => None,
        }
    }
}

/// Owns the published snapshot, the sources, and the registry.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use engine::{RankedSource, Registry, ReloadController};
/// use logging::{Level, MemorySink, PlainFormatter};
/// use rules::RawMapping;
/// use sources::MapSource;
///
/// let overrides = Arc::new(MapSource::new(RawMapping::default()));
/// let registry = Registry::new(Arc::new(PlainFormatter), Arc::new(MemorySink::new()));
/// let controller = ReloadController::new(
///     vec![RankedSource::with_default_rank(Arc::clone(&overrides))],
///     registry,
///     Level::Error,
/// );
///
/// let db = controller.logger("/db");
/// assert_eq!(db.level(), Level::Error);
///
/// overrides.replace(RawMapping::pattern_to_level().with_entry("/db", "DEBUG"));
/// controller.reload();
/// assert_eq!(db.level(), Level::Debug);
/// ```
pub struct ReloadController {
    snapshot: ArcSwap<ConfigSnapshot>,
    sources: Vec<RankedSource>,
    registry: Registry,
    default_level: Level,
    in_flight: AtomicBool,
    pending: AtomicBool,
    requested: AtomicU8,
    generation: AtomicU64,
}

impl ReloadController {
    /// Creates a controller holding an empty snapshot.
    ///
    /// Nothing is read until the first [`reload`](Self::reload).
    #[must_use]
    pub fn new(sources: Vec<RankedSource>, registry: Registry, default_level: Level) -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(ConfigSnapshot::empty(default_level)),
            sources,
            registry,
            default_level,
            in_flight: AtomicBool::new(false),
            pending: AtomicBool::new(false),
            requested: AtomicU8::new(Trigger::Explicit.as_u8()),
            generation: AtomicU64::new(0),
        }
    }

    /// The currently published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<ConfigSnapshot> {
        self.snapshot.load_full()
    }

    /// The logger registry.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Registered sources in registration order.
    pub fn sources(&self) -> impl ExactSizeIterator<Item = &RankedSource> + '_ {
        self.sources.iter()
    }

    /// Level applied when no rule matches.
    #[must_use]
    pub const fn default_level(&self) -> Level {
        self.default_level
    }

    /// Returns the logger for `name`, creating it at its resolved level.
    pub fn logger(&self, name: &str) -> Arc<Logger> {
        self.registry.get_or_create(name, None, || self.snapshot.load_full())
    }

    /// Like [`logger`](Self::logger), but a newly created logger uses
    /// `fallback` instead of the default level while no rule matches it.
    pub fn logger_or(&self, name: &str, fallback: Level) -> Arc<Logger> {
        self.registry
            .get_or_create(name, Some(fallback), || self.snapshot.load_full())
    }

    /// Whether a rebuild is running right now.
    #[must_use]
    pub fn state(&self) -> ReloadState {
        if self.in_flight.load(Ordering::SeqCst) {
            ReloadState::Reloading
        } else {
            ReloadState::Idle
        }
    }

    /// Number of completed rebuilds.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Reloads on an explicit request.
    pub fn reload(&self) -> ReloadOutcome {
        self.reload_for(Trigger::Explicit)
    }

    /// Re-reads every source, publishes the merged snapshot, and updates
    /// every live logger in place.
    pub fn reload_for(&self, trigger: Trigger) -> ReloadOutcome {
        self.requested.store(trigger.as_u8(), Ordering::SeqCst);
        self.pending.store(true, Ordering::SeqCst);
        if self.in_flight.swap(true, Ordering::SeqCst) {
            trace_reload_coalesced(trigger);
            return ReloadOutcome::Coalesced;
        }

        let mut last = None;
        loop {
            while self.pending.swap(false, Ordering::SeqCst) {
                let requested = Trigger::from_u8(self.requested.load(Ordering::SeqCst));
                last = Some(self.rebuild(requested.unwrap_or(trigger)));
            }
            self.in_flight.store(false, Ordering::SeqCst);
            // A request may have landed between the final swap and the store.
            if !self.pending.load(Ordering::SeqCst)
                || self.in_flight.swap(true, Ordering::SeqCst)
            {
                break;
            }
        }

        // `last` is empty only if the previous owner picked this request up
        // before releasing.
        last.map_or(ReloadOutcome::Coalesced, ReloadOutcome::Completed)
    }

    fn rebuild(&self, trigger: Trigger) -> ReloadReport {
        let mut builder = SnapshotBuilder::new();
        builder.default_level(self.default_level);

        let mut failed_sources = Vec::new();
        for source in &self.sources {
            let label = source.provider.label();
            match panic::catch_unwind(AssertUnwindSafe(|| source.provider.acquire())) {
                Ok(Ok(mapping)) => {
                    builder.add(source.rank, &mapping);
                }
                Ok(Err(error)) => {
                    trace_source_failed(label, &error);
                    failed_sources.push(label.to_owned());
                }
                Err(_) => {
                    trace_source_panicked(label);
                    failed_sources.push(label.to_owned());
                }
            }
        }

        let snapshot = Arc::new(builder.build());
        self.snapshot.store(Arc::clone(&snapshot));
        let loggers_updated = self.registry.apply(&snapshot);
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;

        let report = ReloadReport {
            trigger,
            generation,
            rules: snapshot.len(),
            dropped_rules: builder.dropped().len(),
            loggers_updated,
            failed_sources,
        };
        trace_reload_completed(&report);
        report
    }
}

impl fmt::Debug for ReloadController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReloadController")
            .field("sources", &self.sources)
            .field("registry", &self.registry)
            .field("default_level", &self.default_level)
            .field("state", &self.state())
            .field("generation", &self.generation())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logging::{MemorySink, PlainFormatter};
    use rules::{RawMapping, SourceKind};
    use sources::{MapSource, SourceError};

    struct Broken;

    impl SourceProvider for Broken {
        fn label(&self) -> &str {
            "broken"
        }

        fn kind(&self) -> SourceKind {
            SourceKind::File
        }

        fn acquire(&self) -> Result<RawMapping, SourceError> {
            Err(SourceError::Io {
                path: "broken".into(),
                source: std::io::Error::other("unplugged"),
            })
        }
    }

    fn controller(sources: Vec<RankedSource>) -> ReloadController {
        let registry = Registry::new(Arc::new(PlainFormatter), Arc::new(MemorySink::new()));
        ReloadController::new(sources, registry, Level::Error)
    }

    #[test]
    fn starts_empty_and_idle() {
        let controller = controller(Vec::new());
        assert!(controller.snapshot().is_empty());
        assert_eq!(controller.state(), ReloadState::Idle);
        assert_eq!(controller.generation(), 0);
    }

    #[test]
    fn reload_reports_counts() {
        let map = MapSource::new(
            RawMapping::level_to_patterns()
                .with_entry("DEBUG", "/a /b")
                .with_entry("LOUD", "/c"),
        );
        let controller = controller(vec![RankedSource::new(SourceRank::new(1), map)]);
        controller.logger("/a");

        let outcome = controller.reload();
        let report = outcome.report().expect("completed");
        assert_eq!(report.trigger, Trigger::Explicit);
        assert_eq!(report.generation, 1);
        assert_eq!(report.rules, 2);
        assert_eq!(report.dropped_rules, 1);
        assert_eq!(report.loggers_updated, 1);
        assert!(report.failed_sources.is_empty());
        assert_eq!(controller.state(), ReloadState::Idle);
    }

    #[test]
    fn failed_source_counts_as_empty() {
        let map = MapSource::new(RawMapping::pattern_to_level().with_entry("/x", "INFO"));
        let controller = controller(vec![
            RankedSource::new(SourceRank::new(1), Broken),
            RankedSource::new(SourceRank::new(2), map),
        ]);

        let outcome = controller.reload_for(Trigger::Signal);
        let report = outcome.report().unwrap();
        assert_eq!(report.failed_sources, ["broken"]);
        assert_eq!(controller.snapshot().resolve("/x"), Level::Info);
    }

    struct Panicking;

    impl SourceProvider for Panicking {
        fn label(&self) -> &str {
            "panicking"
        }

        fn kind(&self) -> SourceKind {
            SourceKind::Code
        }

        fn acquire(&self) -> Result<RawMapping, SourceError> {
            panic!("provider bug");
        }
    }

    #[test]
    fn panicking_source_counts_as_empty() {
        let map = MapSource::new(RawMapping::pattern_to_level().with_entry("/x", "INFO"));
        let controller = controller(vec![
            RankedSource::new(SourceRank::new(1), Panicking),
            RankedSource::new(SourceRank::new(2), map),
        ]);

        let report = controller.reload().report().cloned().unwrap();
        assert_eq!(report.failed_sources, ["panicking"]);
        assert_eq!(controller.snapshot().resolve("/x"), Level::Info);
        assert_eq!(controller.state(), ReloadState::Idle);
    }

    #[test]
    fn report_carries_the_requested_trigger() {
        let controller = controller(Vec::new());
        let outcome = controller.reload_for(Trigger::Interval);
        assert_eq!(outcome.report().map(|r| r.trigger), Some(Trigger::Interval));
    }

    #[test]
    fn with_default_rank_uses_kind() {
        let source = RankedSource::with_default_rank(MapSource::new(RawMapping::default()));
        assert_eq!(source.rank(), SourceKind::Code.default_rank());
        assert_eq!(source.provider().label(), "code");
    }
}

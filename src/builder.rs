//! src/builder.rs
//!
//! Assembles a [`Loglove`] from sources, options, and output capabilities.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use engine::{RankedSource, Registry, ReloadController, WatchConfig, Watcher};
use logging::{Formatter, Level, Sink, TimestampFormatter, WriterSink};
use rules::SourceRank;
use sources::SourceProvider;

use crate::facade::Loglove;
use crate::options::Options;
use crate::trace::trace_watcher_unavailable;

/// Builder for [`Loglove`].
///
/// Sources added with [`source`](Self::source) take their precedence from
/// registration order: each one overrides every source registered before
/// it. [`source_with_rank`](Self::source_with_rank) places a source at an
/// explicit rank instead.
///
/// Without further configuration the built instance formats lines with
/// [`TimestampFormatter`] and writes them to standard output.
pub struct LogloveBuilder {
    options: Options,
    sources: Vec<RankedSource>,
    formatter: Option<Arc<dyn Formatter>>,
    sink: Option<Arc<dyn Sink>>,
}

impl LogloveBuilder {
    pub(crate) fn new(options: Options) -> Self {
        Self {
            options,
            sources: Vec::new(),
            formatter: None,
            sink: None,
        }
    }

    /// Adds a source above every source added so far.
    pub fn source<P: SourceProvider + 'static>(self, provider: P) -> Self {
        let rank = SourceRank::new(u16::try_from(self.sources.len()).unwrap_or(u16::MAX));
        self.source_with_rank(rank, provider)
    }

    /// Adds a source at an explicit rank.
    pub fn source_with_rank<P: SourceProvider + 'static>(
        mut self,
        rank: SourceRank,
        provider: P,
    ) -> Self {
        self.sources.push(RankedSource::new(rank, provider));
        self
    }

    /// Level of loggers no rule matches. Defaults to [`Level::Error`].
    pub fn default_level(mut self, level: Level) -> Self {
        self.options.default_level = level;
        self
    }

    /// Reloads every `interval` on a background thread.
    pub fn reload_interval(mut self, interval: Duration) -> Self {
        self.options.reload_interval = Some(interval);
        self
    }

    /// Reloads when the process receives SIGHUP (Unix only).
    pub fn watch_signals(mut self, enabled: bool) -> Self {
        self.options.watch_signals = enabled;
        self
    }

    /// Formatter shared by every logger.
    pub fn formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Sink shared by every logger.
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Prefix removed from logger names before lookup.
    pub fn root_path(mut self, root: impl Into<String>) -> Self {
        self.options.root_path = root.into();
        self
    }

    /// The data options collected so far.
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// Builds the instance.
    ///
    /// The first reload runs before this returns, so loggers obtained from
    /// the result already carry their configured levels. If the background
    /// watcher cannot be started the instance still works; only automatic
    /// reloads are lost.
    pub fn build(self) -> Loglove {
        let Self {
            options,
            sources,
            formatter,
            sink,
        } = self;

        let formatter = formatter.unwrap_or_else(|| Arc::new(TimestampFormatter));
        let sink = sink.unwrap_or_else(|| Arc::new(WriterSink::stdout()));
        let registry = Registry::new(formatter, sink).with_root_path(options.root_path);
        let controller = Arc::new(ReloadController::new(
            sources,
            registry,
            options.default_level,
        ));
        controller.reload();

        let watch = WatchConfig {
            interval: options.reload_interval,
            signals: options.watch_signals,
            ..WatchConfig::default()
        };
        let watcher = if watch.is_active() {
            match Watcher::spawn(Arc::clone(&controller), watch) {
                Ok(watcher) => Some(watcher),
                Err(error) => {
                    trace_watcher_unavailable(&error);
                    None
                }
            }
        } else {
            None
        };

        Loglove::from_parts(controller, watcher)
    }
}

impl Default for LogloveBuilder {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl fmt::Debug for LogloveBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogloveBuilder")
            .field("options", &self.options)
            .field("sources", &self.sources)
            .field("formatter", &self.formatter.is_some())
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logging::{MemorySink, PlainFormatter};
    use rules::RawMapping;
    use sources::MapSource;

    fn code(level: &str, patterns: &str) -> MapSource {
        MapSource::new(RawMapping::level_to_patterns().with_entry(level, patterns))
    }

    #[test]
    fn registration_order_sets_precedence() {
        let builder = LogloveBuilder::default()
            .source(code("DEBUG", "/a"))
            .source(code("OFF", "/a"));
        let ranks: Vec<_> = builder.sources.iter().map(RankedSource::rank).collect();
        assert_eq!(ranks, vec![SourceRank::new(0), SourceRank::new(1)]);

        let loglove = builder
            .formatter(Arc::new(PlainFormatter))
            .sink(Arc::new(MemorySink::new()))
            .build();
        assert_eq!(loglove.log("/a").level(), Level::Off);
    }

    #[test]
    fn explicit_rank_beats_later_registration() {
        let loglove = LogloveBuilder::default()
            .source_with_rank(SourceRank::new(50), code("INFO", "/a"))
            .source(code("OFF", "/a"))
            .sink(Arc::new(MemorySink::new()))
            .build();
        assert_eq!(loglove.log("/a").level(), Level::Info);
    }

    #[test]
    fn options_are_collected() {
        let builder = LogloveBuilder::default()
            .default_level(Level::Notice)
            .reload_interval(Duration::from_secs(5))
            .watch_signals(true)
            .root_path("/srv");
        assert_eq!(
            builder.options(),
            &Options {
                default_level: Level::Notice,
                reload_interval: Some(Duration::from_secs(5)),
                watch_signals: true,
                root_path: "/srv".to_owned(),
            }
        );
    }

    #[test]
    fn passive_build_has_no_watcher() {
        let loglove = LogloveBuilder::default().sink(Arc::new(MemorySink::new())).build();
        assert!(!loglove.is_watching());
    }
}

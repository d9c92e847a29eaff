//! crates/engine/src/registry.rs
//!
//! Concurrent name-to-logger map.
//!
//! The registry guarantees at most one [`Logger`] per canonical name. Lookups
//! take a shard read lock; creation takes the shard write lock through
//! `entry().or_insert_with`, so two threads asking for the same new name get
//! the same instance.

use std::sync::Arc;

use dashmap::DashMap;
use logging::{Formatter, Level, Logger, Sink};
use rules::ConfigSnapshot;

use crate::trace::trace_logger_created;

/// Name used when a caller asks for the empty name.
pub const DEFAULT_LOGGER_NAME: &str = "default";

struct Entry {
    logger: Arc<Logger>,
    fallback: Option<Level>,
}

impl Entry {
    fn level_in(&self, snapshot: &ConfigSnapshot) -> Level {
        level_for(snapshot, self.logger.name(), self.fallback)
    }
}

fn level_for(snapshot: &ConfigSnapshot, name: &str, fallback: Option<Level>) -> Level {
    snapshot.resolve_or(name, fallback.unwrap_or_else(|| snapshot.default_level()))
}

/// Every logger handed out so far, keyed by canonical name.
///
/// Loggers are never removed; callers may hold them for the life of the
/// process and expect later reloads to reach them.
pub struct Registry {
    loggers: DashMap<String, Entry>,
    root_path: String,
    formatter: Arc<dyn Formatter>,
    sink: Arc<dyn Sink>,
}

impl Registry {
    /// Creates an empty registry whose loggers share `formatter` and `sink`.
    #[must_use]
    pub fn new(formatter: Arc<dyn Formatter>, sink: Arc<dyn Sink>) -> Self {
        Self {
            loggers: DashMap::new(),
            root_path: String::new(),
            formatter,
            sink,
        }
    }

    /// Strips `root` from the front of names before lookup.
    ///
    /// Lets applications name loggers after absolute source paths while
    /// configuring them relative to the project root.
    #[must_use]
    pub fn with_root_path(mut self, root: impl Into<String>) -> Self {
        self.root_path = root.into();
        self
    }

    /// The configured root prefix.
    #[must_use]
    pub fn root_path(&self) -> &str {
        &self.root_path
    }

    /// Maps a requested name to the key loggers are stored under.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use engine::Registry;
    /// use logging::{MemorySink, PlainFormatter};
    ///
    /// let registry = Registry::new(Arc::new(PlainFormatter), Arc::new(MemorySink::new()))
    ///     .with_root_path("/srv/app");
    /// assert_eq!(registry.canonical_name("/srv/app/db/pool.rs"), "/db/pool.rs");
    /// assert_eq!(registry.canonical_name("/elsewhere"), "/elsewhere");
    /// assert_eq!(registry.canonical_name(""), "default");
    /// ```
    #[must_use]
    pub fn canonical_name<'a>(&self, name: &'a str) -> &'a str {
        let name = if self.root_path.is_empty() {
            name
        } else {
            name.strip_prefix(self.root_path.as_str()).unwrap_or(name)
        };
        if name.is_empty() {
            DEFAULT_LOGGER_NAME
        } else {
            name
        }
    }

    /// Returns the logger for `name`, creating it at `snapshot`'s level.
    ///
    /// `snapshot` is called only when the logger is created, while the
    /// shard lock is held, so a concurrent reload either sees the new logger
    /// or published its snapshot before this one was read.
    pub fn get_or_create<S>(
        &self,
        name: &str,
        fallback: Option<Level>,
        snapshot: S,
    ) -> Arc<Logger>
    where
        S: FnOnce() -> Arc<ConfigSnapshot>,
    {
        let name = self.canonical_name(name);
        if let Some(entry) = self.loggers.get(name) {
            return Arc::clone(&entry.logger);
        }

        let entry = self.loggers.entry(name.to_owned()).or_insert_with(|| {
            let level = level_for(&snapshot(), name, fallback);
            trace_logger_created(name, level);
            Entry {
                logger: Arc::new(Logger::new(
                    name,
                    level,
                    Arc::clone(&self.formatter),
                    Arc::clone(&self.sink),
                )),
                fallback,
            }
        });
        Arc::clone(&entry.logger)
    }

    /// Returns an existing logger without creating one.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Logger>> {
        self.loggers
            .get(self.canonical_name(name))
            .map(|entry| Arc::clone(&entry.logger))
    }

    /// Applies `snapshot` to every registered logger in place.
    ///
    /// Returns how many loggers changed level.
    pub fn apply(&self, snapshot: &ConfigSnapshot) -> usize {
        let mut changed = 0;
        for entry in &self.loggers {
            let level = entry.level_in(snapshot);
            if entry.logger.apply_level(level) != level {
                changed += 1;
            }
        }
        changed
    }

    /// Number of registered loggers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    /// Reports whether no logger has been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .loggers
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }

    /// Calls `f` with every logger registered when the call starts.
    ///
    /// No registry lock is held while `f` runs, so `f` may itself create
    /// or look up loggers.
    pub fn for_each<F: FnMut(&Arc<Logger>)>(&self, mut f: F) {
        let loggers: Vec<Arc<Logger>> = self
            .loggers
            .iter()
            .map(|entry| Arc::clone(&entry.logger))
            .collect();
        for logger in &loggers {
            f(logger);
        }
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("loggers", &self.loggers.len())
            .field("root_path", &self.root_path)
            .finish_non_exhaustive()
    }
}

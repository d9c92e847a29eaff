//! src/facade.rs
//!
//! The [`Loglove`] handle applications keep for the life of the process.

use std::sync::{Arc, OnceLock};

use engine::{ReloadController, ReloadOutcome, ReloadState, Watcher};
use logging::{Level, Logger};
use rules::ConfigSnapshot;
use sources::{EnvSource, FileSource};

use crate::builder::LogloveBuilder;
use crate::options::Options;

static GLOBAL: OnceLock<Loglove> = OnceLock::new();

/// A configured set of loggers whose levels follow the registered sources.
///
/// Dropping the value stops the background watcher, if any. Loggers handed
/// out earlier keep working at the level they last received.
#[derive(Debug)]
pub struct Loglove {
    controller: Arc<ReloadController>,
    watcher: Option<Watcher>,
}

impl Loglove {
    /// Starts an empty builder with default [`Options`].
    pub fn builder() -> LogloveBuilder {
        LogloveBuilder::default()
    }

    /// Starts a builder from existing options.
    pub fn with_options(options: Options) -> LogloveBuilder {
        LogloveBuilder::new(options)
    }

    /// Builds the environment-driven stack.
    ///
    /// Sources, lowest precedence first: the configuration file named by
    /// `LOGLOVE_CONFIG` (default `love.config`), then `LOGLOVE_<LEVEL>`
    /// variables. Unmatched loggers sit at [`Level::Error`], SIGHUP triggers
    /// a reload, and `LOG_LOVE_ROOT_PATH` is stripped from logger names.
    pub fn from_env() -> Self {
        Self::with_options(Options::from_env())
            .source(FileSource::from_env())
            .source(EnvSource::new())
            .build()
    }

    /// Process-wide instance built by [`from_env`](Self::from_env) on first use.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::from_env)
    }

    pub(crate) const fn from_parts(
        controller: Arc<ReloadController>,
        watcher: Option<Watcher>,
    ) -> Self {
        Self {
            controller,
            watcher,
        }
    }

    /// Returns the logger for `name`, creating it on first use.
    ///
    /// Every call with the same name returns the same logger.
    pub fn log(&self, name: &str) -> Arc<Logger> {
        self.controller.logger(name)
    }

    /// Like [`log`](Self::log), but unmatched names resolve to `fallback`
    /// instead of the default level.
    ///
    /// Libraries use this with [`Level::Off`] so they stay silent unless the
    /// application configures them.
    pub fn log_or(&self, name: &str, fallback: Level) -> Arc<Logger> {
        self.controller.logger_or(name, fallback)
    }

    /// Re-reads every source and updates existing loggers in place.
    pub fn reload(&self) -> ReloadOutcome {
        self.controller.reload()
    }

    /// The snapshot currently in effect.
    pub fn snapshot(&self) -> Arc<ConfigSnapshot> {
        self.controller.snapshot()
    }

    /// Whether a reload is running.
    pub fn state(&self) -> ReloadState {
        self.controller.state()
    }

    /// The controller behind this instance.
    pub const fn controller(&self) -> &Arc<ReloadController> {
        &self.controller
    }

    /// Reports whether a background watcher is running.
    pub const fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }

    /// Stops the background watcher and waits for it.
    pub fn shutdown(mut self) {
        if let Some(watcher) = self.watcher.take() {
            watcher.shutdown();
        }
    }
}

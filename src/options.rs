//! src/options.rs
//!
//! Plain-data construction options for [`Loglove`](crate::Loglove).
//!
//! Everything here can be serialized (with the `serde` feature) so an
//! application may keep it in its own configuration file. Capabilities that
//! are not data (sources, formatter, sink) are supplied to the builder.

use std::env;
use std::time::Duration;

use logging::Level;

/// Environment variable naming the prefix stripped from every logger name.
pub const ROOT_PATH_ENV_VAR: &str = "LOG_LOVE_ROOT_PATH";

/// Data options accepted by [`LogloveBuilder`](crate::LogloveBuilder).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use loglove::{Level, Loglove, Options};
///
/// let options = Options {
///     default_level: Level::Warning,
///     reload_interval: Some(Duration::from_secs(30)),
///     ..Options::default()
/// };
/// let loglove = Loglove::with_options(options).build();
/// assert_eq!(loglove.snapshot().default_level(), Level::Warning);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct Options {
    /// Level of loggers no rule matches.
    pub default_level: Level,
    /// Periodic reload interval; `None` disables periodic reloads.
    pub reload_interval: Option<Duration>,
    /// Reload when the process receives SIGHUP.
    pub watch_signals: bool,
    /// Prefix removed from logger names before lookup and resolution.
    pub root_path: String,
}

impl Options {
    /// Options for a process configured through its environment.
    ///
    /// SIGHUP watching is on and the root path comes from
    /// [`ROOT_PATH_ENV_VAR`].
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            watch_signals: true,
            root_path: env::var(ROOT_PATH_ENV_VAR).unwrap_or_default(),
            ..Self::default()
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            default_level: Level::Error,
            reload_interval: None,
            watch_signals: false,
            root_path: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_quiet_and_passive() {
        let options = Options::default();
        assert_eq!(options.default_level, Level::Error);
        assert_eq!(options.reload_interval, None);
        assert!(!options.watch_signals);
        assert!(options.root_path.is_empty());
    }

    #[test]
    fn from_env_watches_signals() {
        assert!(Options::from_env().watch_signals);
        assert_eq!(Options::from_env().default_level, Level::Error);
    }
}

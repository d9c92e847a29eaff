//! crates/sources/src/args.rs
//! `--log-level LEVEL=PATTERNS` command-line specs.

use clap::{Arg, ArgAction, ArgMatches};
use rules::{RawMapping, SourceKind};

use crate::error::SourceError;
use crate::provider::SourceProvider;
use crate::trace::trace_spec_dropped;

/// Argument id used by [`ArgsSource::arg`].
pub const LOG_LEVEL_ARG: &str = "log-level";

/// Level specs given on the command line.
///
/// Add [`ArgsSource::arg`] to the application's `clap` command, then build
/// the source from the parsed matches. Specs without `=` are dropped.
///
/// # Examples
///
/// ```
/// use clap::Command;
/// use sources::{ArgsSource, SourceProvider};
///
/// let matches = Command::new("app")
///     .arg(ArgsSource::arg())
///     .get_matches_from(["app", "--log-level", "DEBUG=/db/*", "--log-level", "OFF=/noisy"]);
///
/// let source = ArgsSource::from_matches(&matches);
/// assert_eq!(source.acquire().unwrap().len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ArgsSource {
    specs: Vec<String>,
}

impl ArgsSource {
    /// The repeatable `--log-level LEVEL=PATTERNS` argument.
    #[must_use]
    pub fn arg() -> Arg {
        Arg::new(LOG_LEVEL_ARG)
            .long("log-level")
            .value_name("LEVEL=PATTERNS")
            .help("Set LEVEL for loggers matching PATTERNS (space separated); may repeat.")
            .action(ArgAction::Append)
    }

    /// Collects the specs from parsed matches.
    ///
    /// Matches from a command without [`ArgsSource::arg`] yield no specs.
    #[must_use]
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let specs = matches
            .try_get_many::<String>(LOG_LEVEL_ARG)
            .ok()
            .flatten()
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        Self { specs }
    }

    /// Uses the given specs directly.
    #[must_use]
    pub fn from_specs<I, S>(specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            specs: specs.into_iter().map(Into::into).collect(),
        }
    }

    /// The raw specs, in command-line order.
    #[must_use]
    pub fn specs(&self) -> &[String] {
        &self.specs
    }
}

impl SourceProvider for ArgsSource {
    fn label(&self) -> &str {
        "command line"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::CommandLine
    }

    fn acquire(&self) -> Result<RawMapping, SourceError> {
        let mut mapping = RawMapping::level_to_patterns();
        for spec in &self.specs {
            match spec.split_once('=') {
                Some((level, patterns)) => mapping.push(level.trim(), patterns.trim()),
                None => trace_spec_dropped(spec),
            }
        }
        Ok(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Command;

    #[test]
    fn specs_without_equals_are_dropped() {
        let source = ArgsSource::from_specs(["DEBUG=/a /b", "bogus", "INFO=/c"]);
        let mapping = source.acquire().unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.entries()[0].1, "/a /b");
    }

    #[test]
    fn missing_argument_definition_yields_nothing() {
        let matches = Command::new("bare").get_matches_from(["bare"]);
        assert!(ArgsSource::from_matches(&matches).specs().is_empty());
    }

    #[test]
    fn absent_flag_yields_nothing() {
        let matches = Command::new("app")
            .arg(ArgsSource::arg())
            .get_matches_from(["app"]);
        assert!(ArgsSource::from_matches(&matches).specs().is_empty());
    }
}

//! crates/sources/src/env.rs
//! `LOGLOVE_<LEVEL>` environment variables.

use std::env;

use logging::Level;
use rules::{RawMapping, SourceKind};

use crate::error::SourceError;
use crate::provider::SourceProvider;

/// Prefix shared by every level variable.
pub const ENV_PREFIX: &str = "LOGLOVE_";

/// Reads `LOGLOVE_<LEVEL>=pattern pattern ...` variables.
///
/// Any level name [`Level::from_name`] accepts may follow the prefix, so
/// `LOGLOVE_WARN` and `LOGLOVE_WARNING` both configure warnings. Other
/// `LOGLOVE_*` variables, such as `LOGLOVE_CONFIG`, are ignored.
///
/// # Examples
///
/// ```
/// use sources::{EnvSource, SourceProvider};
///
/// let source = EnvSource::from_vars([
///     ("LOGLOVE_DEBUG", "/db/*"),
///     ("LOGLOVE_CONFIG", "love.config"),
///     ("HOME", "/root"),
/// ]);
/// let mapping = source.acquire().unwrap();
/// assert_eq!(mapping.entries(), [("DEBUG".to_owned(), "/db/*".to_owned())]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EnvSource {
    captured: Option<Vec<(String, String)>>,
}

impl EnvSource {
    /// Reads the process environment on every acquire.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a fixed set of variables instead of the process environment.
    #[must_use]
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            captured: Some(
                vars.into_iter()
                    .map(|(key, value)| (key.into(), value.into()))
                    .collect(),
            ),
        }
    }

    fn mapping_from<I>(vars: I) -> RawMapping
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut entries: Vec<(Level, String, String)> = vars
            .into_iter()
            .filter_map(|(key, value)| {
                let suffix = key.strip_prefix(ENV_PREFIX)?;
                let level = Level::from_name(suffix)?;
                Some((level, suffix.to_owned(), value))
            })
            .collect();
        // Environment order is unspecified.
        entries.sort();

        let mut mapping = RawMapping::level_to_patterns();
        mapping.extend(entries.into_iter().map(|(_, name, value)| (name, value)));
        mapping
    }
}

impl SourceProvider for EnvSource {
    fn label(&self) -> &str {
        "environment"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Environment
    }

    fn acquire(&self) -> Result<RawMapping, SourceError> {
        Ok(match &self.captured {
            Some(vars) => Self::mapping_from(vars.iter().cloned()),
            None => Self::mapping_from(env::vars_os().filter_map(|(key, value)| {
                Some((key.into_string().ok()?, value.into_string().ok()?))
            })),
        })
    }
}

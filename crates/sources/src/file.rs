//! crates/sources/src/file.rs
//! Configuration files in line or JSON format.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rules::{RawMapping, SourceKind};
use serde_json::{Map, Value};

use crate::error::SourceError;
use crate::provider::SourceProvider;
use crate::trace::trace_file_missing;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "LOGLOVE_CONFIG";

/// File read when [`CONFIG_ENV_VAR`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "love.config";

/// Reads a configuration file on every [`acquire`](SourceProvider::acquire).
///
/// Two formats are accepted, chosen by the first non-blank character:
///
/// - `{` starts a JSON object of `"pattern": "LEVEL"` pairs.
/// - Anything else is read as lines of `LEVEL=pattern pattern ...`. Blank
///   lines, lines starting with `#`, and lines without `=` are ignored.
///
/// A file that does not exist yields an empty mapping.
///
/// # Examples
///
/// ```
/// use rules::Orientation;
/// use sources::FileSource;
///
/// let mapping = FileSource::parse("# services\nDEBUG=/svc/* /db\nINFO = /web\n").unwrap();
/// assert_eq!(mapping.orientation(), Orientation::LevelToPatterns);
/// assert_eq!(mapping.len(), 2);
///
/// let mapping = FileSource::parse(r#"{"/svc/*": "DEBUG"}"#).unwrap();
/// assert_eq!(mapping.orientation(), Orientation::PatternToLevel);
/// ```
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
    label: String,
}

impl FileSource {
    /// Creates a source for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        Self { path, label }
    }

    /// Creates a source for the file named by `LOGLOVE_CONFIG`, or
    /// `love.config` in the working directory.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(env::var_os(CONFIG_ENV_VAR).unwrap_or_else(|| DEFAULT_CONFIG_PATH.into()))
    }

    /// The configured path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses configuration text in either format.
    ///
    /// # Errors
    ///
    /// Returns the parser error when the text starts with `{` but is not a
    /// JSON object. Entries whose value is not a string are kept with the
    /// value's JSON text as the level, which later resolves to no level and
    /// drops only that entry.
    pub fn parse(text: &str) -> Result<RawMapping, serde_json::Error> {
        if text.trim_start().starts_with('{') {
            parse_json(text)
        } else {
            Ok(parse_lines(text))
        }
    }
}

impl SourceProvider for FileSource {
    fn label(&self) -> &str {
        &self.label
    }

    fn kind(&self) -> SourceKind {
        SourceKind::File
    }

    fn acquire(&self) -> Result<RawMapping, SourceError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                trace_file_missing(&self.path);
                return Ok(RawMapping::default());
            }
            Err(source) => {
                return Err(SourceError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        Self::parse(&text).map_err(|source| SourceError::Json {
            path: self.path.clone(),
            source,
        })
    }
}

fn parse_lines(text: &str) -> RawMapping {
    let mut mapping = RawMapping::level_to_patterns();
    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((level, patterns)) = line.split_once('=') {
            mapping.push(level.trim(), patterns.trim());
        }
    }
    mapping
}

fn parse_json(text: &str) -> Result<RawMapping, serde_json::Error> {
    let object: Map<String, Value> = serde_json::from_str(text)?;
    let mut mapping = RawMapping::pattern_to_level();
    for (pattern, level) in object {
        // A non-string level keeps its JSON text and is dropped as an unknown level.
        let level = match level {
            Value::String(level) => level,
            other => other.to_string(),
        };
        mapping.push(pattern, level);
    }
    Ok(mapping)
}

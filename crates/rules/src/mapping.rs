//! crates/rules/src/mapping.rs
//! Raw source mappings and their normalisation into rules.

use logging::Level;

use crate::error::RuleError;
use crate::rank::SourceRank;
use crate::rule::PatternRule;

/// Which side of each entry holds the level.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Orientation {
    /// `LEVEL -> "pattern pattern ..."`, as in line-oriented config files
    /// and `LOGLOVE_<LEVEL>` variables.
    #[default]
    LevelToPatterns,
    /// `pattern -> LEVEL`, as in JSON config files.
    PatternToLevel,
}

/// An ordered list of string entries as a source supplied them.
///
/// Nothing is validated until [`rules`](Self::rules) normalises the
/// mapping. Entry order is preserved so that a later entry for the same
/// pattern replaces an earlier one.
///
/// # Examples
///
/// ```
/// use logging::Level;
/// use rules::{RawMapping, SourceRank};
///
/// let mapping = RawMapping::level_to_patterns()
///     .with_entry("DEBUG", "/app/* /db")
///     .with_entry("LOUD", "/x");
///
/// let (rules, dropped) = mapping.rules(SourceRank::MIN);
/// assert_eq!(rules.len(), 2);
/// assert_eq!(rules[1].pattern(), "/db");
/// assert_eq!(rules[1].level(), Level::Debug);
/// assert_eq!(dropped.len(), 1);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RawMapping {
    orientation: Orientation,
    entries: Vec<(String, String)>,
}

impl RawMapping {
    /// Creates an empty mapping with the given orientation.
    #[must_use]
    pub const fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            entries: Vec::new(),
        }
    }

    /// Creates an empty `LEVEL -> patterns` mapping.
    #[must_use]
    pub const fn level_to_patterns() -> Self {
        Self::new(Orientation::LevelToPatterns)
    }

    /// Creates an empty `pattern -> LEVEL` mapping.
    #[must_use]
    pub const fn pattern_to_level() -> Self {
        Self::new(Orientation::PatternToLevel)
    }

    /// Appends an entry, builder style.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// Appends an entry.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// The mapping's orientation.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Number of raw entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the mapping has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Normalises every entry into rules at `rank`.
    ///
    /// Pattern lists are split on whitespace. Entries with an unknown level
    /// or no patterns are returned in the second vector instead.
    #[must_use]
    pub fn rules(&self, rank: SourceRank) -> (Vec<PatternRule>, Vec<RuleError>) {
        let mut rules = Vec::new();
        let mut dropped = Vec::new();

        for (key, value) in &self.entries {
            let (level_name, patterns) = match self.orientation {
                Orientation::LevelToPatterns => (key, value),
                Orientation::PatternToLevel => (value, key),
            };
            let Some(level) = Level::from_name(level_name) else {
                dropped.push(RuleError::unknown_level(level_name));
                continue;
            };
            let before = rules.len();
            rules.extend(
                patterns
                    .split_whitespace()
                    .map(|pattern| PatternRule::new(pattern, level, rank)),
            );
            if rules.len() == before {
                dropped.push(RuleError::empty_pattern_list(key));
            }
        }

        (rules, dropped)
    }
}

impl<K, V> Extend<(K, V)> for RawMapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.push(key, value);
        }
    }
}

//! crates/logging/src/levels.rs
//! Ordered severity levels and the atomic cell loggers keep them in.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::error::ParseLevelError;

/// Syslog-style severity threshold.
///
/// Variants are declared from least to most verbose so the derived ordering
/// matches ordinal comparison: `Off < Emergency < ... < Debug`. A logger whose
/// threshold is `Info` emits everything up to and including `Info`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
#[repr(u8)]
pub enum Level {
    /// Suppresses all output.
    Off = 0,
    /// A panic condition usually affecting multiple systems.
    Emergency = 1,
    /// Must be corrected immediately.
    Alert = 2,
    /// Failure in a secondary system.
    Critical = 3,
    /// Non-urgent failure.
    #[default]
    Error = 4,
    /// An error will occur if no action is taken.
    Warning = 5,
    /// Unusual but not erroneous.
    Notice = 6,
    /// Normal operational messages.
    Info = 7,
    /// Developer diagnostics.
    Debug = 8,
}

impl Level {
    /// Every level, least verbose first.
    pub const ALL: [Self; 9] = [
        Self::Off,
        Self::Emergency,
        Self::Alert,
        Self::Critical,
        Self::Error,
        Self::Warning,
        Self::Notice,
        Self::Info,
        Self::Debug,
    ];

    /// Levels a message can be emitted at (everything except [`Level::Off`]).
    pub const SEVERITIES: [Self; 8] = [
        Self::Emergency,
        Self::Alert,
        Self::Critical,
        Self::Error,
        Self::Warning,
        Self::Notice,
        Self::Info,
        Self::Debug,
    ];

    /// Canonical uppercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Emergency => "EMERGENCY",
            Self::Alert => "ALERT",
            Self::Critical => "CRITICAL",
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Notice => "NOTICE",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }

    /// Parses a level name.
    ///
    /// Surrounding whitespace is ignored and matching is case-insensitive.
    /// Besides the canonical names, the short forms `WARN`, `ERR`, `CRIT`
    /// and `EMERG` are accepted. Returns `None` for anything else.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::Level;
    ///
    /// assert_eq!(Level::from_name(" debug "), Some(Level::Debug));
    /// assert_eq!(Level::from_name("WARN"), Some(Level::Warning));
    /// assert_eq!(Level::from_name("verbose"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "OFF" => Some(Self::Off),
            "EMERGENCY" | "EMERG" => Some(Self::Emergency),
            "ALERT" => Some(Self::Alert),
            "CRITICAL" | "CRIT" => Some(Self::Critical),
            "ERROR" | "ERR" => Some(Self::Error),
            "WARNING" | "WARN" => Some(Self::Warning),
            "NOTICE" => Some(Self::Notice),
            "INFO" => Some(Self::Info),
            "DEBUG" => Some(Self::Debug),
            _ => None,
        }
    }

    /// Converts an ordinal back into a level.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Off),
            1 => Some(Self::Emergency),
            2 => Some(Self::Alert),
            3 => Some(Self::Critical),
            4 => Some(Self::Error),
            5 => Some(Self::Warning),
            6 => Some(Self::Notice),
            7 => Some(Self::Info),
            8 => Some(Self::Debug),
            _ => None,
        }
    }

    /// Returns the ordinal.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Reports whether a logger at this threshold emits a message at `requested`.
    ///
    /// Nothing is ever emitted *at* [`Level::Off`], and a threshold of `Off`
    /// permits nothing.
    pub fn permits(self, requested: Self) -> bool {
        requested != Self::Off && self >= requested
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ParseLevelError::new(s))
    }
}

/// A [`Level`] stored in an [`AtomicU8`].
///
/// Loads and stores are single atomic operations, so a concurrent reader
/// always observes either the previous or the new level.
#[derive(Debug)]
pub struct AtomicLevel(AtomicU8);

impl AtomicLevel {
    /// Creates a cell holding `level`.
    pub const fn new(level: Level) -> Self {
        Self(AtomicU8::new(level as u8))
    }

    /// Reads the current level.
    #[inline]
    pub fn load(&self) -> Level {
        // only valid ordinals are ever stored
        Level::from_u8(self.0.load(Ordering::Acquire)).unwrap_or(Level::Off)
    }

    /// Replaces the level.
    #[inline]
    pub fn store(&self, level: Level) {
        self.0.store(level as u8, Ordering::Release);
    }

    /// Replaces the level and returns the previous one.
    pub fn swap(&self, level: Level) -> Level {
        Level::from_u8(self.0.swap(level as u8, Ordering::AcqRel)).unwrap_or(Level::Off)
    }
}

impl Default for AtomicLevel {
    fn default() -> Self {
        Self::new(Level::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_verbosity() {
        assert!(Level::Off < Level::Emergency);
        assert!(Level::Error < Level::Warning);
        assert!(Level::Info < Level::Debug);
        let mut sorted = Level::ALL;
        sorted.reverse();
        sorted.sort();
        assert_eq!(sorted, Level::ALL);
    }

    #[test]
    fn names_round_trip() {
        for level in Level::ALL {
            assert_eq!(Level::from_name(level.as_str()), Some(level));
            assert_eq!(level.as_str().parse::<Level>().unwrap(), level);
        }
    }

    #[test]
    fn aliases_and_case() {
        assert_eq!(Level::from_name("warn"), Some(Level::Warning));
        assert_eq!(Level::from_name("Err"), Some(Level::Error));
        assert_eq!(Level::from_name("crit"), Some(Level::Critical));
        assert_eq!(Level::from_name("EMERG"), Some(Level::Emergency));
        assert_eq!(Level::from_name(""), None);
        assert!("loud".parse::<Level>().is_err());
    }

    #[test]
    fn permits_respects_threshold_and_off() {
        assert!(Level::Info.permits(Level::Error));
        assert!(Level::Info.permits(Level::Info));
        assert!(!Level::Info.permits(Level::Debug));
        assert!(!Level::Off.permits(Level::Emergency));
        assert!(!Level::Debug.permits(Level::Off));
    }

    #[test]
    fn ordinal_round_trip() {
        for level in Level::ALL {
            assert_eq!(Level::from_u8(level.as_u8()), Some(level));
        }
        assert_eq!(Level::from_u8(9), None);
    }

    #[test]
    fn atomic_level_swaps() {
        let cell = AtomicLevel::new(Level::Error);
        assert_eq!(cell.load(), Level::Error);
        cell.store(Level::Debug);
        assert_eq!(cell.load(), Level::Debug);
        assert_eq!(cell.swap(Level::Off), Level::Debug);
        assert_eq!(cell.load(), Level::Off);
    }

    #[test]
    fn default_is_error() {
        assert_eq!(Level::default(), Level::Error);
        assert_eq!(AtomicLevel::default().load(), Level::Error);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn level() -> impl Strategy<Value = Level> {
            prop::sample::select(Level::ALL.to_vec())
        }

        proptest! {
            #[test]
            fn from_name_ignores_case_and_padding(
                level in level(),
                mask in any::<u16>(),
                pad in 0usize..3,
            ) {
                let name: String = level
                    .as_str()
                    .chars()
                    .enumerate()
                    .map(|(i, c)| {
                        if (mask >> (i % 16)) & 1 == 1 {
                            c.to_ascii_lowercase()
                        } else {
                            c
                        }
                    })
                    .collect();
                let padded = format!("{}{name}{}", " ".repeat(pad), "\t".repeat(pad));
                prop_assert_eq!(Level::from_name(&padded), Some(level));
            }

            #[test]
            fn permits_matches_ordinals(threshold in level(), requested in level()) {
                let expected = requested != Level::Off && threshold.as_u8() >= requested.as_u8();
                prop_assert_eq!(threshold.permits(requested), expected);
            }
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_uppercase_names() {
        let json = serde_json::to_string(&Level::Warning).unwrap();
        assert_eq!(json, "\"WARNING\"");
        let level: Level = serde_json::from_str("\"DEBUG\"").unwrap();
        assert_eq!(level, Level::Debug);
    }
}

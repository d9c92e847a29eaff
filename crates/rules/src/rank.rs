//! crates/rules/src/rank.rs
//! Source precedence.

use std::fmt;

/// Fixed precedence of a configuration source; higher wins.
///
/// Ranks are assigned when a source is registered and never change.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SourceRank(u16);

impl SourceRank {
    /// The lowest possible rank.
    pub const MIN: Self = Self(0);

    /// Creates a rank from its raw value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl From<u16> for SourceRank {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl fmt::Display for SourceRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rank {}", self.0)
    }
}

/// Where a configuration source gets its mapping from.
///
/// Variants are declared in the recommended ascending precedence: a file is
/// overridden by code, code by the environment, and the environment by the
/// command line.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum SourceKind {
    /// A configuration file on disk.
    File,
    /// A mapping supplied programmatically.
    Code,
    /// Process environment variables.
    Environment,
    /// Command-line arguments.
    CommandLine,
}

impl SourceKind {
    /// All kinds in ascending recommended precedence.
    pub const ALL: [Self; 4] = [Self::File, Self::Code, Self::Environment, Self::CommandLine];

    /// Recommended rank for a source of this kind.
    ///
    /// Ranks are spaced so callers can slot custom sources between kinds.
    #[must_use]
    pub const fn default_rank(self) -> SourceRank {
        match self {
            Self::File => SourceRank(100),
            Self::Code => SourceRank(200),
            Self::Environment => SourceRank(300),
            Self::CommandLine => SourceRank(400),
        }
    }

    /// Lowercase name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Code => "code",
            Self::Environment => "environment",
            Self::CommandLine => "command-line",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! crates/rules/src/error.rs
//!
//! Reasons a configuration entry is rejected.

use thiserror::Error;

/// A configuration entry that could not become a rule.
///
/// Snapshot construction never fails on these; the entry is dropped and the
/// error is kept for diagnostics.
#[derive(Clone, Debug, Error)]
pub enum RuleError {
    /// The level name is not one of the recognised levels.
    #[error("unknown level '{name}'")]
    UnknownLevel {
        /// The rejected name, trimmed.
        name: String,
    },
    /// A level was configured with no patterns.
    #[error("no patterns given for level '{level}'")]
    EmptyPatternList {
        /// The level key (or pattern key) that had nothing to apply to.
        level: String,
    },
    /// The pattern could not be compiled into a glob matcher.
    #[error("failed to compile pattern '{pattern}': {source}")]
    InvalidGlob {
        /// The offending pattern.
        pattern: String,
        /// Compiler diagnostic.
        #[source]
        source: globset::Error,
    },
}

impl RuleError {
    pub(crate) fn unknown_level(name: &str) -> Self {
        Self::UnknownLevel {
            name: name.trim().to_owned(),
        }
    }

    pub(crate) fn empty_pattern_list(level: &str) -> Self {
        Self::EmptyPatternList {
            level: level.trim().to_owned(),
        }
    }

    pub(crate) const fn invalid_glob(pattern: String, source: globset::Error) -> Self {
        Self::InvalidGlob { pattern, source }
    }
}

#[cfg(test)]
mod tests {
    use super::RuleError;
    use globset::GlobBuilder;
    use std::error::Error as _;

    #[test]
    fn invalid_glob_preserves_pattern_and_source() {
        let glob_err = GlobBuilder::new("[").build().unwrap_err();
        let error = RuleError::invalid_glob("[".into(), glob_err.clone());

        assert!(error.to_string().contains("failed to compile pattern '['"));
        assert_eq!(error.source().unwrap().to_string(), glob_err.to_string());
    }

    #[test]
    fn level_errors_trim_their_input() {
        assert_eq!(
            RuleError::unknown_level(" LOUD ").to_string(),
            "unknown level 'LOUD'"
        );
        assert_eq!(
            RuleError::empty_pattern_list("DEBUG ").to_string(),
            "no patterns given for level 'DEBUG'"
        );
        assert!(RuleError::unknown_level("x").source().is_none());
    }
}

//! crates/rules/src/rule.rs
//! Normalised pattern rules and their compiled matchers.

use std::fmt;

use globset::{GlobBuilder, GlobMatcher};
use logging::Level;

use crate::error::RuleError;
use crate::rank::SourceRank;

const WILDCARDS: [char; 2] = ['*', '?'];
const ESCAPED: [char; 5] = ['[', ']', '{', '}', '\\'];

/// Glob text for a `**` that does not fill a whole segment: any run of
/// characters, `/` included.
const ANY_DEPTH: &str = "{*,*/**/*}";

/// One `(pattern, level, rank)` entry after normalisation.
///
/// Only `*`, `**` and `?` are wildcards. Every other character matches
/// itself, so a pattern always matches its own text. `**` crosses `/`
/// wherever it appears: `/app**` matches both `/appx` and `/app/db/x`.
/// Longer runs of `*` behave as `**`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PatternRule {
    pattern: String,
    level: Level,
    rank: SourceRank,
}

impl PatternRule {
    /// Creates a rule.
    #[must_use]
    pub fn new(pattern: impl Into<String>, level: Level, rank: SourceRank) -> Self {
        Self {
            pattern: pattern.into(),
            level,
            rank,
        }
    }

    /// The pattern text.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The level applied to matching loggers.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Precedence of the source that supplied this rule.
    #[must_use]
    pub const fn rank(&self) -> SourceRank {
        self.rank
    }

    /// Reports whether the pattern contains no wildcard.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        !self.pattern.contains(WILDCARDS)
    }

    /// Number of `/`-separated segments that are non-empty and wildcard free.
    ///
    /// ```
    /// use logging::Level;
    /// use rules::{PatternRule, SourceRank};
    ///
    /// let rule = PatternRule::new("/app/db/*", Level::Debug, SourceRank::MIN);
    /// assert_eq!(rule.specificity(), 2);
    /// ```
    #[must_use]
    pub fn specificity(&self) -> usize {
        self.pattern
            .split('/')
            .filter(|segment| !segment.is_empty() && !segment.contains(WILDCARDS))
            .count()
    }

    pub(crate) fn compile(self) -> Result<CompiledRule, RuleError> {
        let matcher = if self.is_literal() {
            None
        } else {
            let glob = GlobBuilder::new(&glob_text(&self.pattern))
                .literal_separator(true)
                .backslash_escape(true)
                .build()
                .map_err(|error| RuleError::invalid_glob(self.pattern.clone(), error))?;
            Some(glob.compile_matcher())
        };
        Ok(CompiledRule {
            rule: self,
            matcher,
        })
    }
}

impl fmt::Display for PatternRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.level, self.pattern, self.rank)
    }
}

/// Rewrites a pattern into globset syntax.
///
/// Metacharacters other than `*` and `?` are escaped. globset only treats
/// `**` as recursive when it is a whole segment, so any other run of two or
/// more stars becomes [`ANY_DEPTH`].
fn glob_text(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut glob = String::with_capacity(pattern.len() + ANY_DEPTH.len());
    let mut index = 0;
    while let Some(&ch) = chars.get(index) {
        if ch == '*' {
            let run = chars[index..].iter().take_while(|&&c| c == '*').count();
            if run == 1 {
                glob.push('*');
            } else {
                let opens_segment = index == 0 || chars[index - 1] == '/';
                let closes_segment = chars.get(index + run).is_none_or(|&c| c == '/');
                glob.push_str(if opens_segment && closes_segment {
                    "**"
                } else {
                    ANY_DEPTH
                });
            }
            index += run;
            continue;
        }
        if ESCAPED.contains(&ch) {
            glob.push('\\');
        }
        glob.push(ch);
        index += 1;
    }
    glob
}

/// Ordering key for choosing among matching rules.
///
/// Compared lexicographically: rank, literal over wildcard, specificity,
/// then the more verbose level.
pub(crate) type Precedence = (SourceRank, bool, usize, Level);

/// A rule paired with its matcher. Literal rules compare by equality.
#[derive(Clone, Debug)]
pub(crate) struct CompiledRule {
    rule: PatternRule,
    matcher: Option<GlobMatcher>,
}

impl CompiledRule {
    pub(crate) const fn rule(&self) -> &PatternRule {
        &self.rule
    }

    pub(crate) fn matches(&self, name: &str) -> bool {
        self.matcher
            .as_ref()
            .map_or_else(|| self.rule.pattern == name, |matcher| matcher.is_match(name))
    }

    pub(crate) fn precedence(&self) -> Precedence {
        (
            self.rule.rank,
            self.rule.is_literal(),
            self.rule.specificity(),
            self.rule.level,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compiled(pattern: &str) -> CompiledRule {
        PatternRule::new(pattern, Level::Debug, SourceRank::MIN)
            .compile()
            .expect("pattern compiles")
    }

    #[test]
    fn literal_detection() {
        assert!(PatternRule::new("/a/b", Level::Info, SourceRank::MIN).is_literal());
        assert!(PatternRule::new("/a/[b]", Level::Info, SourceRank::MIN).is_literal());
        assert!(!PatternRule::new("/a/*", Level::Info, SourceRank::MIN).is_literal());
        assert!(!PatternRule::new("/a/b?", Level::Info, SourceRank::MIN).is_literal());
    }

    #[test]
    fn specificity_counts_literal_segments() {
        let specificity_of =
            |p: &str| PatternRule::new(p, Level::Info, SourceRank::MIN).specificity();
        assert_eq!(specificity_of("**"), 0);
        assert_eq!(specificity_of("/*"), 0);
        assert_eq!(specificity_of("/app/*"), 1);
        assert_eq!(specificity_of("/app/db/*"), 2);
        assert_eq!(specificity_of("/app/d?/x"), 2);
        assert_eq!(specificity_of("//app//"), 1);
    }

    #[test]
    fn single_star_stays_within_a_segment() {
        let rule = compiled("/app/*");
        assert!(rule.matches("/app/db"));
        assert!(!rule.matches("/app/db/pool"));
        assert!(!rule.matches("/app"));
    }

    #[test]
    fn double_star_crosses_segments() {
        let rule = compiled("/app/**");
        assert!(rule.matches("/app/db"));
        assert!(rule.matches("/app/db/pool"));
        assert!(compiled("**").matches("anything/at/all"));
    }

    #[test]
    fn unbounded_double_star_crosses_segments() {
        let rule = compiled("/app**");
        assert!(rule.matches("/app"));
        assert!(rule.matches("/appx"));
        assert!(rule.matches("/app/db/x"));
        assert!(!rule.matches("/ap/db"));

        let inner = compiled("/a**b");
        assert!(inner.matches("/ab"));
        assert!(inner.matches("/a/x/y/b"));
        assert!(!inner.matches("/a/x/y/c"));

        assert!(compiled("**.rs").matches("/src/db/pool.rs"));
        assert!(compiled("/src/**pool").matches("/src/db/pool"));
    }

    #[test]
    fn star_runs_behave_as_double_star() {
        assert!(compiled("/app/***").matches("/app/db/pool"));
        assert!(compiled("/app***").matches("/app/db/pool"));
    }

    #[test]
    fn glob_text_rewrites_only_partial_segments() {
        assert_eq!(glob_text("/app/**"), "/app/**");
        assert_eq!(glob_text("**/x"), "**/x");
        assert_eq!(glob_text("/a/**/b"), "/a/**/b");
        assert_eq!(glob_text("/app**"), format!("/app{ANY_DEPTH}"));
        assert_eq!(glob_text("/a/***x"), format!("/a/{ANY_DEPTH}x"));
        assert_eq!(glob_text("/[x]"), "/\\[x\\]");
    }

    #[test]
    fn question_mark_is_one_non_separator_char() {
        let rule = compiled("/a?c");
        assert!(rule.matches("/abc"));
        assert!(!rule.matches("/ac"));
        assert!(!rule.matches("/a/c"));
    }

    #[test]
    fn brackets_and_braces_match_themselves() {
        let rule = compiled("/x/{a,b}/[0-9]*");
        assert!(rule.matches("/x/{a,b}/[0-9]tail"));
        assert!(!rule.matches("/x/a/5"));
    }

    #[test]
    fn literal_rules_compare_exactly() {
        let rule = compiled("/app/db");
        assert!(rule.matches("/app/db"));
        assert!(!rule.matches("/app/db/"));
        assert!(!rule.matches("/App/db"));
    }

    #[test]
    fn precedence_orders_rank_first() {
        let low = PatternRule::new("/a/b", Level::Debug, SourceRank::new(1))
            .compile()
            .unwrap();
        let high = PatternRule::new("**", Level::Off, SourceRank::new(2))
            .compile()
            .unwrap();
        assert!(high.precedence() > low.precedence());
    }

    #[test]
    fn display_shows_level_pattern_and_rank() {
        let rule = PatternRule::new("/a/*", Level::Warning, SourceRank::new(3));
        assert_eq!(rule.to_string(), "WARNING=/a/* (rank 3)");
    }
}

//! crates/rules/src/snapshot.rs
//! Ranked merge of source mappings and level resolution.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use logging::Level;

use crate::error::RuleError;
use crate::mapping::RawMapping;
use crate::rank::SourceRank;
use crate::rule::{CompiledRule, PatternRule};
use crate::trace::{trace_rule_dropped, trace_rule_replaced, trace_snapshot_built};

/// Immutable result of merging every source's rules.
///
/// A snapshot is built once per reload and shared behind an `Arc`; lookups
/// never lock.
///
/// # Examples
///
/// ```
/// use logging::Level;
/// use rules::{ConfigSnapshot, RawMapping, SourceRank};
///
/// let file = RawMapping::pattern_to_level().with_entry("/x", "DEBUG");
/// let cli = RawMapping::pattern_to_level().with_entry("/*", "ERROR");
///
/// let snapshot = ConfigSnapshot::builder()
///     .add(SourceRank::new(1), &file)
///     .add(SourceRank::new(2), &cli)
///     .build();
///
/// assert_eq!(snapshot.resolve("/x"), Level::Error);
/// assert_eq!(snapshot.resolve("/x/y"), Level::Error);
/// ```
#[derive(Clone, Debug)]
pub struct ConfigSnapshot {
    rules: Vec<CompiledRule>,
    default_level: Level,
}

impl ConfigSnapshot {
    /// A snapshot with no rules, resolving every name to `default_level`.
    #[must_use]
    pub const fn empty(default_level: Level) -> Self {
        Self {
            rules: Vec::new(),
            default_level,
        }
    }

    /// Starts a builder with the [`Level::Error`] default.
    #[must_use]
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::new()
    }

    /// Level used when no rule matches.
    #[must_use]
    pub const fn default_level(&self) -> Level {
        self.default_level
    }

    /// The merged rules, in the order they were first added.
    pub fn rules(&self) -> impl ExactSizeIterator<Item = &PatternRule> + '_ {
        self.rules.iter().map(CompiledRule::rule)
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Reports whether the snapshot holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolves the effective level for a logger name.
    ///
    /// Among the rules matching `name`, the winner has the highest source
    /// rank; then a literal pattern beats a wildcard; then the pattern with
    /// more literal segments wins; any remaining tie takes the more verbose
    /// level. With no match the default level applies. The result does not
    /// depend on rule order.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Level {
        self.resolve_or(name, self.default_level)
    }

    /// Like [`resolve`](Self::resolve), with `fallback` in place of the
    /// default level when no rule matches.
    ///
    /// Libraries use this to stay silent (`Off`) unless configured.
    #[must_use]
    pub fn resolve_or(&self, name: &str, fallback: Level) -> Level {
        self.winning_rule(name).map_or(fallback, PatternRule::level)
    }

    /// Returns the rule that decides `name`, if any.
    #[must_use]
    pub fn winning_rule(&self, name: &str) -> Option<&PatternRule> {
        self.rules
            .iter()
            .filter(|rule| rule.matches(name))
            .max_by_key(|rule| rule.precedence())
            .map(CompiledRule::rule)
    }
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        Self::empty(Level::default())
    }
}

/// Collects ranked rules and compiles them into a [`ConfigSnapshot`].
///
/// Construction never fails. Entries with unknown levels, empty pattern
/// lists, or patterns that do not compile are left out and recorded in
/// [`dropped`](Self::dropped). A later rule with the same pattern and rank
/// replaces the earlier one.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    default_level: Level,
    rules: Vec<PatternRule>,
    index: HashMap<(String, SourceRank), usize>,
    dropped: Vec<RuleError>,
}

impl SnapshotBuilder {
    /// Creates a builder with the [`Level::Error`] default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the level used when no rule matches.
    pub const fn default_level(&mut self, level: Level) -> &mut Self {
        self.default_level = level;
        self
    }

    /// Normalises `mapping` and adds its rules at `rank`.
    pub fn add(&mut self, rank: SourceRank, mapping: &RawMapping) -> &mut Self {
        let (rules, dropped) = mapping.rules(rank);
        for error in dropped {
            self.drop_entry(rank, error);
        }
        for rule in rules {
            self.add_rule(rule);
        }
        self
    }

    /// Adds one already-normalised rule.
    pub fn add_rule(&mut self, rule: PatternRule) -> &mut Self {
        match self.index.entry((rule.pattern().to_owned(), rule.rank())) {
            Entry::Occupied(slot) => {
                let existing = &mut self.rules[*slot.get()];
                trace_rule_replaced(existing, &rule);
                *existing = rule;
            }
            Entry::Vacant(slot) => {
                slot.insert(self.rules.len());
                self.rules.push(rule);
            }
        }
        self
    }

    /// Entries rejected so far.
    #[must_use]
    pub fn dropped(&self) -> &[RuleError] {
        &self.dropped
    }

    /// Compiles the collected rules.
    ///
    /// Patterns that fail to compile are dropped here.
    #[must_use]
    pub fn build(&mut self) -> ConfigSnapshot {
        let mut compiled = Vec::with_capacity(self.rules.len());
        for rule in self.rules.drain(..) {
            let rank = rule.rank();
            match rule.compile() {
                Ok(rule) => compiled.push(rule),
                Err(error) => {
                    trace_rule_dropped(rank, &error);
                    self.dropped.push(error);
                }
            }
        }
        self.index.clear();

        trace_snapshot_built(compiled.len(), self.dropped.len(), self.default_level);
        ConfigSnapshot {
            rules: compiled,
            default_level: self.default_level,
        }
    }

    fn drop_entry(&mut self, rank: SourceRank, error: RuleError) {
        trace_rule_dropped(rank, &error);
        self.dropped.push(error);
    }
}

//! Tracing hooks for snapshot construction.
//!
//! Every function compiles to an inline no-op unless the `tracing` feature
//! is enabled.

#[cfg(feature = "tracing")]
const RULES_TARGET: &str = "loglove::rules";

/// Traces a configuration entry that was dropped during merge.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_rule_dropped(rank: crate::SourceRank, error: &crate::RuleError) {
    tracing::warn!(
        target: RULES_TARGET,
        rank = rank.get(),
        error = %error,
        "rule_dropped"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_rule_dropped(_rank: crate::SourceRank, _error: &crate::RuleError) {}

/// Traces a rule replaced by a later entry of the same source.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_rule_replaced(previous: &crate::PatternRule, next: &crate::PatternRule) {
    tracing::debug!(
        target: RULES_TARGET,
        pattern = %next.pattern(),
        rank = next.rank().get(),
        from = %previous.level(),
        to = %next.level(),
        "rule_replaced"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_rule_replaced(_previous: &crate::PatternRule, _next: &crate::PatternRule) {}

/// Traces a completed snapshot.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_snapshot_built(rules: usize, dropped: usize, default_level: logging::Level) {
    tracing::debug!(
        target: RULES_TARGET,
        rules = rules,
        dropped = dropped,
        default_level = %default_level,
        "snapshot_built"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_snapshot_built(_rules: usize, _dropped: usize, _default_level: logging::Level) {
}

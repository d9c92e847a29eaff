//! Integration tests for threshold filtering.
//!
//! These tests verify that a logger emits exactly the messages at or below
//! its threshold, for every threshold and every severity.

use std::sync::Arc;

use logging::{Level, Logger, MemorySink, PlainFormatter};

fn logger_at(level: Level) -> (Logger, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::new("/filter", level, Arc::new(PlainFormatter), sink.clone());
    (logger, sink)
}

fn emit_all(logger: &Logger) {
    logger
        .emergency("emergency")
        .alert("alert")
        .critical("critical")
        .error("error")
        .warning("warning")
        .notice("notice")
        .info("info")
        .debug("debug");
}

// ============================================================================
// Threshold Matrix
// ============================================================================

/// Verifies every threshold emits precisely the severities it permits.
#[test]
fn each_threshold_emits_its_prefix_of_severities() {
    for threshold in Level::ALL {
        let (logger, sink) = logger_at(threshold);
        emit_all(&logger);

        let expected: Vec<String> = Level::SEVERITIES
            .iter()
            .filter(|severity| **severity <= threshold)
            .map(|severity| {
                format!(
                    "{} /filter {}",
                    severity.as_str(),
                    severity.as_str().to_ascii_lowercase()
                )
            })
            .collect();
        assert_eq!(sink.lines(), expected, "threshold {threshold}");
    }
}

/// Verifies `enabled` agrees with what is actually emitted.
#[test]
fn enabled_matches_emission() {
    for threshold in Level::ALL {
        let (logger, sink) = logger_at(threshold);
        for severity in Level::SEVERITIES {
            let emitted = logger.log(severity, "x");
            assert_eq!(emitted, logger.enabled(severity));
        }
        let expected = Level::SEVERITIES
            .iter()
            .filter(|severity| threshold.permits(**severity))
            .count();
        assert_eq!(sink.len(), expected);
    }
}

/// Verifies `warn` is the same operation as `warning`.
#[test]
fn warn_alias_emits_warning() {
    let (logger, sink) = logger_at(Level::Warning);
    logger.warn("careful");
    assert_eq!(sink.last().as_deref(), Some("WARNING /filter careful"));
}

// ============================================================================
// Macros
// ============================================================================

/// Verifies the format macros interpolate when enabled.
#[test]
fn macros_interpolate_when_enabled() {
    let (logger, sink) = logger_at(Level::Debug);
    logging::error!(logger, "code {}", 23);
    logging::notice!(logger, "{name} joined", name = "moe");
    logging::debug!(logger, "{:?}", ("a", 1));

    assert_eq!(
        sink.lines(),
        vec![
            "ERROR /filter code 23".to_owned(),
            "NOTICE /filter moe joined".to_owned(),
            "DEBUG /filter (\"a\", 1)".to_owned(),
        ]
    );
}

/// Verifies suppressed macro calls never run the arguments' `Display` impls.
#[test]
fn macros_skip_interpolation_when_disabled() {
    use std::cell::Cell;
    use std::fmt;

    struct Counting<'a>(&'a Cell<u32>);

    impl fmt::Display for Counting<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.set(self.0.get() + 1);
            f.write_str("counted")
        }
    }

    let (logger, sink) = logger_at(Level::Warning);
    let renders = Cell::new(0);
    logging::info!(logger, "{}", Counting(&renders));
    logging::debug!(logger, "{}", Counting(&renders));
    assert_eq!(renders.get(), 0);
    assert!(sink.is_empty());

    logging::warning!(logger, "{}", Counting(&renders));
    assert_eq!(renders.get(), 1);
    assert_eq!(sink.last().as_deref(), Some("WARNING /filter counted"));
}

/// Verifies macros accept `Arc<Logger>` handles.
#[test]
fn macros_accept_shared_handles() {
    let (logger, sink) = logger_at(Level::Info);
    let shared = Arc::new(logger);
    logging::info!(shared, "via arc");
    assert_eq!(sink.len(), 1);
}

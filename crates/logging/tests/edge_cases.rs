//! Edge cases for deferred messages and failure containment.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use logging::{
    FORMAT_FAILURE_MARKER, FormatError, Formatter, Level, LineMode, Logger, MemorySink,
    PlainFormatter, Record, WriterSink,
};

// ============================================================================
// Deferred Producers
// ============================================================================

/// Verifies a producer below the threshold is never called, at any level.
#[test]
fn producer_never_runs_below_threshold() {
    let calls = Arc::new(AtomicUsize::new(0));
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::new("/lazy", Level::Error, Arc::new(PlainFormatter), sink.clone());

    for severity in [Level::Warning, Level::Notice, Level::Info, Level::Debug] {
        let calls = Arc::clone(&calls);
        logger.log(severity, move || {
            calls.fetch_add(1, Ordering::SeqCst);
            "expensive diagnostic".to_owned()
        });
    }

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(sink.is_empty());
}

/// Verifies a producer returning `Err` yields the marker, not an error.
#[test]
fn producer_error_yields_marker() {
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::new("/lazy", Level::Debug, Arc::new(PlainFormatter), sink.clone());

    logger.debug(|| "42x".parse::<u32>());
    assert_eq!(
        sink.last(),
        Some(format!("DEBUG /lazy {FORMAT_FAILURE_MARKER}"))
    );

    logger.debug(|| "42".parse::<u32>());
    assert_eq!(sink.last().as_deref(), Some("DEBUG /lazy 42"));
}

/// Verifies a panicking producer is contained and the logger stays usable.
#[test]
fn producer_panic_is_contained() {
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::new("/lazy", Level::Info, Arc::new(PlainFormatter), sink.clone());

    logger.info(|| -> String { panic!("template exploded") });
    logger.info("after");

    assert_eq!(
        sink.lines(),
        vec![
            format!("INFO /lazy {FORMAT_FAILURE_MARKER}"),
            "INFO /lazy after".to_owned(),
        ]
    );
}

// ============================================================================
// Formatter and Sink Failures
// ============================================================================

struct RejectingFormatter;

impl Formatter for RejectingFormatter {
    fn format(&self, _record: &Record<'_>) -> Result<String, FormatError> {
        Err(FormatError::Formatter("template missing".into()))
    }
}

/// Verifies a formatter error still produces a line.
#[test]
fn formatter_error_still_emits() {
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::new("/fmt", Level::Error, Arc::new(RejectingFormatter), sink.clone());

    assert!(logger.log(Level::Error, "payload"));
    assert_eq!(
        sink.last(),
        Some(format!("ERROR [/fmt] {FORMAT_FAILURE_MARKER}"))
    );
}

/// Verifies a panicking sink does not reach the caller.
#[test]
fn sink_panic_is_contained() {
    let sink = |_: &str| -> io::Result<()> { panic!("sink bug") };
    let logger = Logger::new("/sink", Level::Info, Arc::new(PlainFormatter), Arc::new(sink));
    assert!(logger.log(Level::Info, "survives"));
}

// ============================================================================
// Concurrency
// ============================================================================

/// Verifies level changes racing with emission never produce torn values.
#[test]
fn concurrent_level_changes_and_emits() {
    let sink = Arc::new(WriterSink::with_line_mode(Vec::new(), LineMode::WithNewline));
    let logger = Arc::new(Logger::new(
        "/race",
        Level::Error,
        Arc::new(PlainFormatter),
        sink.clone(),
    ));

    let flipper = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for i in 0..500 {
                let level = if i % 2 == 0 { Level::Debug } else { Level::Off };
                logger.apply_level(level);
            }
        })
    };
    let emitters: Vec<_> = (0..4)
        .map(|_| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for _ in 0..500 {
                    let level = logger.level();
                    assert!(matches!(level, Level::Error | Level::Debug | Level::Off));
                    logger.info("tick");
                }
            })
        })
        .collect();

    flipper.join().unwrap();
    for emitter in emitters {
        emitter.join().unwrap();
    }
    drop(logger);

    let sink = Arc::try_unwrap(sink).unwrap();
    let output = String::from_utf8(sink.into_inner()).unwrap();
    assert!(output.lines().all(|line| line == "INFO /race tick"));
}

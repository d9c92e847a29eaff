//! crates/logging/src/format.rs
//! Turning an accepted message into the final output line.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::FormatError;
use crate::levels::Level;

/// Everything a [`Formatter`] gets to see about one emitted message.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Record<'a> {
    name: &'a str,
    level: Level,
    message: &'a str,
}

impl<'a> Record<'a> {
    /// Creates a record.
    #[must_use]
    pub const fn new(name: &'a str, level: Level, message: &'a str) -> Self {
        Self {
            name,
            level,
            message,
        }
    }

    /// Name of the logger that emitted the message.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// Severity the message was emitted at.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Rendered message text.
    #[must_use]
    pub const fn message(&self) -> &'a str {
        self.message
    }
}

/// Produces the output line for a [`Record`].
///
/// Lines are returned without a trailing newline; the sink's
/// [`LineMode`](crate::LineMode) decides termination. Any `Fn(&Record) -> String`
/// closure is a formatter.
pub trait Formatter: Send + Sync {
    /// Formats one record.
    fn format(&self, record: &Record<'_>) -> Result<String, FormatError>;
}

impl<F> Formatter for F
where
    F: Fn(&Record<'_>) -> String + Send + Sync,
{
    fn format(&self, record: &Record<'_>) -> Result<String, FormatError> {
        Ok(self(record))
    }
}

/// Default formatter: `<RFC 3339 UTC time> LEVEL [name] message`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimestampFormatter;

impl Formatter for TimestampFormatter {
    fn format(&self, record: &Record<'_>) -> Result<String, FormatError> {
        let stamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|error| FormatError::Formatter(error.to_string()))?;
        Ok(format!(
            "{stamp} {} [{}] {}",
            record.level(),
            record.name(),
            record.message()
        ))
    }
}

/// `LEVEL name message`, for destinations such as syslog that stamp lines themselves.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainFormatter;

impl Formatter for PlainFormatter {
    fn format(&self, record: &Record<'_>) -> Result<String, FormatError> {
        Ok(format!(
            "{} {} {}",
            record.level(),
            record.name(),
            record.message()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_formatter_layout() {
        let record = Record::new("/susie/queue", Level::Error, "we had an error");
        assert_eq!(
            PlainFormatter.format(&record).unwrap(),
            "ERROR /susie/queue we had an error"
        );
    }

    #[test]
    fn timestamp_formatter_layout() {
        let record = Record::new("/db", Level::Info, "connected");
        let line = TimestampFormatter.format(&record).unwrap();
        let (stamp, rest) = line.split_once(' ').unwrap();
        assert!(OffsetDateTime::parse(stamp, &Rfc3339).is_ok(), "{stamp}");
        assert_eq!(rest, "INFO [/db] connected");
    }

    #[test]
    fn closures_are_formatters() {
        let formatter = |record: &Record<'_>| format!("{}|{}", record.name(), record.message());
        let record = Record::new("a", Level::Debug, "b");
        assert_eq!(Formatter::format(&formatter, &record).unwrap(), "a|b");
    }
}

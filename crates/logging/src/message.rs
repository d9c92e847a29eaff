//! crates/logging/src/message.rs
//! Message bodies accepted by the emit operations.
//!
//! A [`LogMessage`] is only rendered after the logger has decided to emit, so
//! the three accepted shapes all cost nothing when the level check fails:
//!
//! - literal text (`&str`, `String`, `Cow<str>`),
//! - pre-parsed format arguments ([`fmt::Arguments`], built by
//!   `format_args!`; interpolation happens when they are rendered),
//! - a deferred producer, any `FnOnce() -> B` where `B: MessageBody`.

use std::borrow::Cow;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::error::FormatError;

/// Text written in place of a message (or a whole line) that could not be rendered.
pub const FORMAT_FAILURE_MARKER: &str = "<loglove: message formatting failed>";

/// Something an emit operation can turn into message text.
pub trait LogMessage {
    /// Produces the message text.
    fn render(self) -> Result<String, FormatError>;
}

/// Value returned by a deferred producer.
pub trait MessageBody {
    /// Converts the produced value into message text.
    fn into_body(self) -> Result<String, FormatError>;
}

impl LogMessage for &str {
    fn render(self) -> Result<String, FormatError> {
        Ok(self.to_owned())
    }
}

impl LogMessage for String {
    fn render(self) -> Result<String, FormatError> {
        Ok(self)
    }
}

impl LogMessage for Cow<'_, str> {
    fn render(self) -> Result<String, FormatError> {
        Ok(self.into_owned())
    }
}

impl LogMessage for fmt::Arguments<'_> {
    fn render(self) -> Result<String, FormatError> {
        Ok(fmt::format(self))
    }
}

impl<F, B> LogMessage for F
where
    F: FnOnce() -> B,
    B: MessageBody,
{
    fn render(self) -> Result<String, FormatError> {
        self().into_body()
    }
}

impl MessageBody for String {
    fn into_body(self) -> Result<String, FormatError> {
        Ok(self)
    }
}

impl MessageBody for &str {
    fn into_body(self) -> Result<String, FormatError> {
        Ok(self.to_owned())
    }
}

impl MessageBody for Cow<'_, str> {
    fn into_body(self) -> Result<String, FormatError> {
        Ok(self.into_owned())
    }
}

impl<T, E> MessageBody for Result<T, E>
where
    T: fmt::Display,
    E: fmt::Display,
{
    fn into_body(self) -> Result<String, FormatError> {
        match self {
            Ok(value) => Ok(value.to_string()),
            Err(error) => Err(FormatError::Producer(error.to_string())),
        }
    }
}

/// Renders `message`, converting a panic inside it into [`FormatError::Panicked`].
pub(crate) fn render_guarded<M: LogMessage>(message: M) -> Result<String, FormatError> {
    guard("message producer", move || message.render())
}

/// Runs `f`, mapping a panic to [`FormatError::Panicked`] for `stage`.
pub(crate) fn guard<T, F>(stage: &'static str, f: F) -> Result<T, FormatError>
where
    F: FnOnce() -> Result<T, FormatError>,
{
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or(Err(FormatError::Panicked { stage }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_render_verbatim() {
        assert_eq!("plain".render().unwrap(), "plain");
        assert_eq!(String::from("owned").render().unwrap(), "owned");
        assert_eq!(Cow::Borrowed("cow").render().unwrap(), "cow");
    }

    #[test]
    fn arguments_interpolate_on_render() {
        let count = 3;
        assert_eq!(
            render_guarded(format_args!("{count} files")).unwrap(),
            "3 files"
        );
    }

    #[test]
    fn producers_run_once_rendered() {
        let rendered = render_guarded(|| format!("{}-{}", "a", 1)).unwrap();
        assert_eq!(rendered, "a-1");
    }

    #[test]
    fn producer_errors_become_format_errors() {
        let result = render_guarded(|| -> Result<String, &str> { Err("no data") });
        assert_eq!(result, Err(FormatError::Producer("no data".into())));
    }

    #[test]
    fn producer_panics_are_caught() {
        let result = render_guarded(|| -> String { panic!("producer exploded") });
        assert_eq!(
            result,
            Err(FormatError::Panicked {
                stage: "message producer"
            })
        );
    }
}

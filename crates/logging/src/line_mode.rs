//! crates/logging/src/line_mode.rs
//!
//! Line terminator choice for writer sinks.

/// How a [`WriterSink`](crate::WriterSink) ends each line it writes.
///
/// Formatters produce lines without a terminator. Pick
/// [`LineMode::WithoutNewline`] for destinations that frame records
/// themselves or for formatters that already end their output with `\n`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LineMode {
    /// Terminate each line with `\n`.
    #[default]
    WithNewline,
    /// Write the formatted line as produced.
    WithoutNewline,
}

impl LineMode {
    /// Bytes written after every line.
    ///
    /// ```
    /// use logging::LineMode;
    ///
    /// assert_eq!(LineMode::WithNewline.terminator(), b"\n");
    /// assert!(LineMode::WithoutNewline.terminator().is_empty());
    /// ```
    #[must_use]
    pub const fn terminator(self) -> &'static [u8] {
        match self {
            Self::WithNewline => b"\n",
            Self::WithoutNewline => b"",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_terminates_with_newline() {
        assert_eq!(LineMode::default(), LineMode::WithNewline);
        assert_eq!(LineMode::default().terminator(), b"\n");
    }
}

//! What asked for a reload.

use std::fmt;

/// Origin of a reload request.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Trigger {
    /// An explicit call, including the initial load.
    Explicit,
    /// The periodic timer fired.
    Interval,
    /// A SIGHUP was received.
    Signal,
}

impl Trigger {
    pub(crate) const fn as_u8(self) -> u8 {
        match self {
            Self::Explicit => 0,
            Self::Interval => 1,
            Self::Signal => 2,
        }
    }

    pub(crate) const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Explicit),
            1 => Some(Self::Interval),
            2 => Some(Self::Signal),
            _ => None,
        }
    }

    /// Lowercase name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Interval => "interval",
            Self::Signal => "signal",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_map_back() {
        for trigger in [Trigger::Explicit, Trigger::Interval, Trigger::Signal] {
            assert_eq!(Trigger::from_u8(trigger.as_u8()), Some(trigger));
        }
        assert_eq!(Trigger::from_u8(3), None);
    }
}

//! Ambient formatting flags
//!
//! A small bitset controlling what every rendered line carries, independent
//! of severity. Mirrors the classic stdlib-logger flag set: date, time,
//! sub-second precision, file name style, and UTC.

use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Flags(u8);

impl Flags {
    /// No ambient decoration; the layout's own timestamp format applies.
    pub const NONE: Flags = Flags(0);
    /// Calendar date, e.g. `2025/01/08`.
    pub const DATE: Flags = Flags(1 << 0);
    /// Wall-clock time, e.g. `10:30:45`.
    pub const TIME: Flags = Flags(1 << 1);
    /// Microsecond resolution; implies [`Flags::TIME`].
    pub const MICROSECONDS: Flags = Flags(1 << 2);
    /// Full path of the resolved caller file.
    pub const LONG_FILE: Flags = Flags(1 << 3);
    /// Final path element of the caller file; overrides [`Flags::LONG_FILE`].
    pub const SHORT_FILE: Flags = Flags(1 << 4);
    /// Render timestamps in UTC instead of local time.
    pub const UTC: Flags = Flags(1 << 5);
    /// Date and time, the conventional default decoration.
    pub const STD: Flags = Flags(Self::DATE.0 | Self::TIME.0);

    #[inline]
    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn intersects(self, other: Flags) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_and_contains() {
        let flags = Flags::DATE | Flags::TIME | Flags::UTC;
        assert!(flags.contains(Flags::DATE));
        assert!(flags.contains(Flags::STD));
        assert!(flags.contains(Flags::UTC));
        assert!(!flags.contains(Flags::SHORT_FILE));
    }

    #[test]
    fn test_intersects() {
        let flags = Flags::MICROSECONDS;
        assert!(flags.intersects(Flags::TIME | Flags::MICROSECONDS));
        assert!(!flags.intersects(Flags::DATE | Flags::TIME));
    }

    #[test]
    fn test_default_is_empty() {
        assert!(Flags::default().is_empty());
        assert!(!Flags::STD.is_empty());
    }

    #[test]
    fn test_or_assign() {
        let mut flags = Flags::NONE;
        flags |= Flags::SHORT_FILE;
        assert!(flags.contains(Flags::SHORT_FILE));
    }
}

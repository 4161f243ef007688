//! Axis-parameter error flags
//!
//! Host tooling expects errors as combinable bit flags rather than a single
//! code, so a reply can report more than one problem. The bit values follow
//! the numbering used by the Trinamic host protocol.

use core::fmt;
use core::ops::{BitOr, BitOrAssign};

/// Combinable error flags returned by parameter and limit operations
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ErrorFlags(u8);

impl ErrorFlags {
    /// No error
    pub const NONE: Self = Self(0x00);
    /// The entry exists but not for the requested direction
    pub const UNSUPPORTED_DIRECTION: Self = Self(0x02);
    /// Unknown parameter id
    pub const UNKNOWN_TYPE: Self = Self(0x04);
    /// Axis index out of range
    pub const UNKNOWN_MOTOR: Self = Self(0x08);
    /// Value rejected by validation
    pub const INVALID_VALUE: Self = Self(0x10);

    const ALL: u8 = 0x02 | 0x04 | 0x08 | 0x10;

    /// Raw flag bits
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Build from raw bits, dropping bits that name no flag
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL)
    }

    /// True if no flag is set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every flag of `other` is set in `self`
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// `Ok(value)` when no flag is set, otherwise `Err(self)`
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl BitOr for ErrorFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ErrorFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for ErrorFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        let names = [
            (Self::UNSUPPORTED_DIRECTION, "UNSUPPORTED_DIRECTION"),
            (Self::UNKNOWN_TYPE, "UNKNOWN_TYPE"),
            (Self::UNKNOWN_MOTOR, "UNKNOWN_MOTOR"),
            (Self::INVALID_VALUE, "INVALID_VALUE"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

//! Floating-point exception flag accumulation.
//!
//! The softfloat engine reports the IEEE conditions raised by each
//! primitive in its own bit order, which differs from the order MIPS
//! uses in the `FCR31` Cause, Enables and Flags fields:
//!
//! | Bit | Engine flag | Guest cause bit |
//! |-----|-------------|-----------------|
//! |  4  | Inexact     | 0               |
//! |  3  | Underflow   | 1               |
//! |  2  | Overflow    | 2               |
//! |  1  | Divide by 0 | 3               |
//! |  0  | Invalid     | 4               |
//!
//! Flags accumulate here across every engine call an instruction makes;
//! the translation to guest encoding happens once, when the result is
//! committed to `FCR31`.

use std::ops::{BitOr, BitOrAssign};

use rustc_apfloat::Status;

use crate::core::arch::fcr;

/// Accumulated softfloat exception flags, in the engine's bit order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FpFlags(u8);

impl FpFlags {
    /// No exceptions raised.
    pub const NONE: Self = Self(0);
    /// Invalid Operation.
    pub const INVALID: Self = Self(0x01);
    /// Divide by Zero.
    pub const DIV_BY_ZERO: Self = Self(0x02);
    /// Overflow.
    pub const OVERFLOW: Self = Self(0x04);
    /// Underflow.
    pub const UNDERFLOW: Self = Self(0x08);
    /// Inexact.
    pub const INEXACT: Self = Self(0x10);

    /// Returns the raw engine-ordered flag byte.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if no flags are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every flag in `other` is set.
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Returns true if any flag in `other` is set.
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Translates the accumulated flags into the guest cause encoding.
    ///
    /// Only the five standard IEEE conditions translate; anything else
    /// the engine reports (for example subnormal-flush notes) has no
    /// architectural counterpart and is dropped.
    ///
    /// # Returns
    ///
    /// A bit set of `FP_*` condition codes suitable for the `FCR31`
    /// Cause, Enables and Flags fields.
    pub fn to_cause_bits(self) -> u32 {
        let mut cause = 0;
        if self.contains(Self::INVALID) {
            cause |= fcr::FP_INVALID;
        }
        if self.contains(Self::OVERFLOW) {
            cause |= fcr::FP_OVERFLOW;
        }
        if self.contains(Self::UNDERFLOW) {
            cause |= fcr::FP_UNDERFLOW;
        }
        if self.contains(Self::DIV_BY_ZERO) {
            cause |= fcr::FP_DIV0;
        }
        if self.contains(Self::INEXACT) {
            cause |= fcr::FP_INEXACT;
        }
        cause
    }
}

impl From<Status> for FpFlags {
    /// Captures the conditions one engine primitive raised.
    fn from(status: Status) -> Self {
        Self(status.bits())
    }
}

impl BitOr for FpFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for FpFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

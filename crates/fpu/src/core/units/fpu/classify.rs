//! Release-6 value classification.
//!
//! `class.fmt` answers "what kind of value is this" as a one-hot bit in
//! a ten-bit field, split by sign for everything except the NaNs. The
//! operation is pure: no condition is raised, nothing commits, and
//! subnormal operands classify as subnormal even when flushing is
//! enabled.

use rustc_apfloat::ieee::{Double, Single};

use crate::common::Trap;

use super::Fpu;
use super::softfp::FpFormat;

/// Signalling NaN.
pub const CLASS_SIGNALING_NAN: u32 = 0x001;
/// Quiet NaN.
pub const CLASS_QUIET_NAN: u32 = 0x002;
/// Negative infinity.
pub const CLASS_NEGATIVE_INFINITY: u32 = 0x004;
/// Negative normal number.
pub const CLASS_NEGATIVE_NORMAL: u32 = 0x008;
/// Negative subnormal number.
pub const CLASS_NEGATIVE_SUBNORMAL: u32 = 0x010;
/// Negative zero.
pub const CLASS_NEGATIVE_ZERO: u32 = 0x020;
/// Positive infinity.
pub const CLASS_POSITIVE_INFINITY: u32 = 0x040;
/// Positive normal number.
pub const CLASS_POSITIVE_NORMAL: u32 = 0x080;
/// Positive subnormal number.
pub const CLASS_POSITIVE_SUBNORMAL: u32 = 0x100;
/// Positive zero.
pub const CLASS_POSITIVE_ZERO: u32 = 0x200;

impl Fpu {
    /// `class.s`: classifies a single-precision value.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the instruction, for the reserved trap on
    ///   pre-release-6 models.
    /// * `fs` - Operand bits.
    ///
    /// # Returns
    ///
    /// One `CLASS_*` bit, in the destination register's low bits.
    pub fn class_s(&self, pc: u64, fs: u32) -> Result<u32, Trap> {
        self.require_release6(pc)?;
        Ok(classify(Single::from_raw(fs)))
    }

    /// `class.d`: [`Fpu::class_s`] in double precision.
    pub fn class_d(&self, pc: u64, fs: u64) -> Result<u64, Trap> {
        self.require_release6(pc)?;
        Ok(u64::from(classify(Double::from_raw(fs))))
    }
}

/// NaNs first, then by sign: infinity, zero, subnormal, normal.
fn classify<F: FpFormat>(value: F) -> u32 {
    if value.is_signaling() {
        CLASS_SIGNALING_NAN
    } else if value.is_nan() {
        CLASS_QUIET_NAN
    } else if value.is_negative() {
        if value.is_infinite() {
            CLASS_NEGATIVE_INFINITY
        } else if value.is_zero() {
            CLASS_NEGATIVE_ZERO
        } else if value.is_denormal() {
            CLASS_NEGATIVE_SUBNORMAL
        } else {
            CLASS_NEGATIVE_NORMAL
        }
    } else if value.is_infinite() {
        CLASS_POSITIVE_INFINITY
    } else if value.is_zero() {
        CLASS_POSITIVE_ZERO
    } else if value.is_denormal() {
        CLASS_POSITIVE_SUBNORMAL
    } else {
        CLASS_POSITIVE_NORMAL
    }
}

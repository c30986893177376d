//! Conversion operation catalog.
//!
//! Covers the `cvt` family plus the fixed-rounding integer forms
//! (`round`, `trunc`, `ceil`, `floor`), which differ from `cvt.w`/`cvt.l`
//! only in overriding `FCR31.RM` for the duration of one conversion.
//!
//! Integer destinations need a result even when the conversion is
//! invalid, and the architecture has two answers:
//!
//! - **Legacy**: any Invalid Operation or Overflow produces the
//!   positive sentinel (`0x7fff_ffff` for words, sign-extended-width
//!   equivalent for longs), whatever the operand was.
//! - **2008** (`FCR31.NAN2008` set): NaN operands produce zero, and
//!   everything else keeps the engine's saturated value, so infinities
//!   land on the format limits by sign.
//!
//! Both policies replace only the returned bits; the raised conditions
//! commit unchanged either way.

use rustc_apfloat::Float;
use rustc_apfloat::ieee::{Double, Single};

use crate::common::Trap;
use crate::core::arch::fcr;

use super::Fpu;
use super::exception_flags::FpFlags;
use super::rounding_modes::RoundingMode;
use super::softfp::{FpCtx, FpFormat, pack_ps, split_ps};

/// Word result of an invalid legacy conversion.
const WORD_OVERFLOW_RESULT: u32 = 0x7fff_ffff;
/// Long result of an invalid legacy conversion.
const LONG_OVERFLOW_RESULT: u64 = 0x7fff_ffff_ffff_ffff;

/// Rounding selection for the integer-destination conversions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntRounding {
    /// `cvt.w`/`cvt.l`: the mode `FCR31.RM` selects.
    Current,
    /// `round.w`/`round.l`: to nearest, ties to even.
    Nearest,
    /// `trunc.w`/`trunc.l`: toward zero.
    Zero,
    /// `ceil.w`/`ceil.l`: toward positive infinity.
    Up,
    /// `floor.w`/`floor.l`: toward negative infinity.
    Down,
}

impl IntRounding {
    /// The override mode, or `None` for the register selection.
    fn fixed_mode(self) -> Option<RoundingMode> {
        match self {
            Self::Current => None,
            Self::Nearest => Some(RoundingMode::Rn),
            Self::Zero => Some(RoundingMode::Rz),
            Self::Up => Some(RoundingMode::Rp),
            Self::Down => Some(RoundingMode::Rm),
        }
    }
}

impl Fpu {
    /// `cvt.d.s`: widens single to double precision.
    pub fn cvt_d_s(&mut self, pc: u64, fs: u32) -> Result<u64, Trap> {
        self.scalar_op(pc, |ctx| ctx.convert::<Single, Double>(Single::from_raw(fs)))
    }

    /// `cvt.d.w`: converts a 32-bit signed integer to double precision.
    ///
    /// Every word value is representable, so this raises nothing, but
    /// it still commits to clear a stale cause field.
    pub fn cvt_d_w(&mut self, pc: u64, fs: u32) -> Result<u64, Trap> {
        self.scalar_op(pc, |ctx| {
            ctx.absorb(Double::from_i128_r(i128::from(fs as i32), ctx.round))
        })
    }

    /// `cvt.d.l`: converts a 64-bit signed integer to double precision.
    pub fn cvt_d_l(&mut self, pc: u64, fs: u64) -> Result<u64, Trap> {
        self.scalar_op(pc, |ctx| {
            ctx.absorb(Double::from_i128_r(i128::from(fs as i64), ctx.round))
        })
    }

    /// `cvt.s.d`: narrows double to single precision.
    pub fn cvt_s_d(&mut self, pc: u64, fs: u64) -> Result<u32, Trap> {
        self.scalar_op(pc, |ctx| ctx.convert::<Double, Single>(Double::from_raw(fs)))
    }

    /// `cvt.s.w`: converts a 32-bit signed integer to single precision.
    pub fn cvt_s_w(&mut self, pc: u64, fs: u32) -> Result<u32, Trap> {
        self.scalar_op(pc, |ctx| {
            ctx.absorb(Single::from_i128_r(i128::from(fs as i32), ctx.round))
        })
    }

    /// `cvt.s.l`: converts a 64-bit signed integer to single precision.
    pub fn cvt_s_l(&mut self, pc: u64, fs: u64) -> Result<u32, Trap> {
        self.scalar_op(pc, |ctx| {
            ctx.absorb(Single::from_i128_r(i128::from(fs as i64), ctx.round))
        })
    }

    /// Converts single precision to a 32-bit signed word.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the instruction, for the trap it may raise.
    /// * `rounding` - Register-selected or one of the four fixed modes.
    /// * `fs` - Operand bits.
    ///
    /// # Returns
    ///
    /// The word bits after the active sentinel policy, or the enabled
    /// floating-point exception.
    pub fn to_w_s(&mut self, pc: u64, rounding: IntRounding, fs: u32) -> Result<u32, Trap> {
        let nan2008 = self.fcr31 & fcr::FCR31_NAN2008 != 0;
        self.value_op(pc, |ctx| {
            let operand = Single::from_raw(fs);
            let raw = match rounding.fixed_mode() {
                Some(mode) => ctx.with_rounding(mode, |ctx| to_int32(ctx, operand)),
                None => to_int32(ctx, operand),
            };
            word_policy(ctx, nan2008, operand, raw)
        })
    }

    /// [`Fpu::to_w_s`] from double precision.
    pub fn to_w_d(&mut self, pc: u64, rounding: IntRounding, fs: u64) -> Result<u32, Trap> {
        let nan2008 = self.fcr31 & fcr::FCR31_NAN2008 != 0;
        self.value_op(pc, |ctx| {
            let operand = Double::from_raw(fs);
            let raw = match rounding.fixed_mode() {
                Some(mode) => ctx.with_rounding(mode, |ctx| to_int32(ctx, operand)),
                None => to_int32(ctx, operand),
            };
            word_policy(ctx, nan2008, operand, raw)
        })
    }

    /// [`Fpu::to_w_s`] with a 64-bit destination.
    pub fn to_l_s(&mut self, pc: u64, rounding: IntRounding, fs: u32) -> Result<u64, Trap> {
        let nan2008 = self.fcr31 & fcr::FCR31_NAN2008 != 0;
        self.value_op(pc, |ctx| {
            let operand = Single::from_raw(fs);
            let raw = match rounding.fixed_mode() {
                Some(mode) => ctx.with_rounding(mode, |ctx| to_int64(ctx, operand)),
                None => to_int64(ctx, operand),
            };
            long_policy(ctx, nan2008, operand, raw)
        })
    }

    /// [`Fpu::to_w_s`] from double precision with a 64-bit destination.
    pub fn to_l_d(&mut self, pc: u64, rounding: IntRounding, fs: u64) -> Result<u64, Trap> {
        let nan2008 = self.fcr31 & fcr::FCR31_NAN2008 != 0;
        self.value_op(pc, |ctx| {
            let operand = Double::from_raw(fs);
            let raw = match rounding.fixed_mode() {
                Some(mode) => ctx.with_rounding(mode, |ctx| to_int64(ctx, operand)),
                None => to_int64(ctx, operand),
            };
            long_policy(ctx, nan2008, operand, raw)
        })
    }

    /// `cvt.s.pl`: extracts the low paired-single lane.
    ///
    /// A lane move with no arithmetic, but it commits like any
    /// conversion so a stale cause field is cleared.
    pub fn cvt_s_pl(&mut self, pc: u64, fs: u64) -> Result<u32, Trap> {
        self.require_paired_single(pc)?;
        self.value_op(pc, |_| split_ps(fs).0)
    }

    /// `cvt.s.pu`: extracts the high paired-single lane.
    pub fn cvt_s_pu(&mut self, pc: u64, fs: u64) -> Result<u32, Trap> {
        self.require_paired_single(pc)?;
        self.value_op(pc, |_| split_ps(fs).1)
    }

    /// `cvt.ps.s`: packs two single-precision values into a pair.
    ///
    /// `fs` becomes the high lane and `ft` the low lane. Pure register
    /// assembly; nothing is raised and nothing commits.
    pub fn cvt_ps_s(&self, pc: u64, fs: u32, ft: u32) -> Result<u64, Trap> {
        self.require_paired_single(pc)?;
        Ok(pack_ps(ft, fs))
    }

    /// `cvt.pw.ps`: converts both lanes to 32-bit signed words.
    ///
    /// The lanes are isolated: each applies the legacy sentinel to its
    /// own conditions before the union of both commits. Paired-single
    /// predates the 2008 revision, so the 2008 policy never applies.
    pub fn cvt_pw_ps(&mut self, pc: u64, fs: u64) -> Result<u64, Trap> {
        self.require_paired_single(pc)?;
        let (low, high) = split_ps(fs);
        self.value_op(pc, |ctx| {
            let mut low_word = to_int32(ctx, Single::from_raw(low));
            if ctx.flags.intersects(FpFlags::INVALID | FpFlags::OVERFLOW) {
                low_word = WORD_OVERFLOW_RESULT;
            }
            let low_flags = ctx.flags;
            ctx.clear_flags();
            let mut high_word = to_int32(ctx, Single::from_raw(high));
            if ctx.flags.intersects(FpFlags::INVALID | FpFlags::OVERFLOW) {
                high_word = WORD_OVERFLOW_RESULT;
            }
            ctx.raise(low_flags);
            pack_ps(low_word, high_word)
        })
    }

    /// `cvt.ps.pw`: converts both 32-bit signed words to single
    /// precision, one lane each.
    pub fn cvt_ps_pw(&mut self, pc: u64, fs: u64) -> Result<u64, Trap> {
        self.require_paired_single(pc)?;
        let (low, high) = split_ps(fs);
        self.paired_op(pc, |ctx| {
            (
                ctx.absorb(Single::from_i128_r(i128::from(low as i32), ctx.round)),
                ctx.absorb(Single::from_i128_r(i128::from(high as i32), ctx.round)),
            )
        })
    }
}

/// Signed 32-bit conversion through the engine, saturated on overflow.
fn to_int32<F: FpFormat>(ctx: &mut FpCtx, value: F) -> u32 {
    let value = ctx.flush_in(value);
    let mut exact = false;
    ctx.absorb(value.to_i128_r(32, ctx.round, &mut exact)) as u32
}

/// Signed 64-bit conversion through the engine, saturated on overflow.
fn to_int64<F: FpFormat>(ctx: &mut FpCtx, value: F) -> u64 {
    let value = ctx.flush_in(value);
    let mut exact = false;
    ctx.absorb(value.to_i128_r(64, ctx.round, &mut exact)) as u64
}

/// Applies the active word-destination result policy.
fn word_policy<F: FpFormat>(ctx: &FpCtx, nan2008: bool, operand: F, raw: u32) -> u32 {
    if nan2008 {
        if ctx.flags.contains(FpFlags::INVALID) && operand.is_nan() {
            0
        } else {
            raw
        }
    } else if ctx.flags.intersects(FpFlags::INVALID | FpFlags::OVERFLOW) {
        WORD_OVERFLOW_RESULT
    } else {
        raw
    }
}

/// Applies the active long-destination result policy.
fn long_policy<F: FpFormat>(ctx: &FpCtx, nan2008: bool, operand: F, raw: u64) -> u64 {
    if nan2008 {
        if ctx.flags.contains(FpFlags::INVALID) && operand.is_nan() {
            0
        } else {
            raw
        }
    } else if ctx.flags.intersects(FpFlags::INVALID | FpFlags::OVERFLOW) {
        LONG_OVERFLOW_RESULT
    } else {
        raw
    }
}

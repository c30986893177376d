//! Softfloat engine adapter.
//!
//! The arbitrary-precision engine behind this unit keeps no global
//! state: every primitive takes a rounding mode and hands back the
//! conditions it raised alongside the value. Hardware works the other
//! way around, with mode and status living in the FPU itself. This
//! module bridges the two worlds:
//!
//! - **Execution context** ([`FpCtx`]): Carries the active rounding
//!   mode, the subnormal-flush control and the conditions accumulated
//!   since the flags were last cleared.
//! - **Format bridge** ([`FpFormat`]): Connects guest register words to
//!   engine values for the two floating-point formats, and fills the
//!   engine's gaps (square root, NaN quietening, signed zero).
//! - **Lane packing** ([`split_ps`], [`pack_ps`]): Paired-single words
//!   hold two single-precision lanes in one 64-bit register.
//!
//! Every arithmetic primitive is funnelled through [`FpCtx`] so that
//! subnormal flushing is applied uniformly on the way in and out.

use rustc_apfloat::ieee::{Double, Single};
use rustc_apfloat::{Float, FloatConvert, Round, Status, StatusAnd};

use super::exception_flags::FpFlags;
use super::rounding_modes::RoundingMode;

/// Shared softfloat execution context.
///
/// Mirrors the state a hardware unit keeps outside the register file:
/// the rounding mode and flush control distilled from `FCR31`, and the
/// exception conditions raised since the last instruction committed.
#[derive(Clone, Copy, Debug)]
pub struct FpCtx {
    /// Rounding mode applied to every engine call.
    pub round: Round,
    /// Conditions accumulated since [`FpCtx::clear_flags`].
    pub flags: FpFlags,
    /// Flush subnormal operands and results to signed zero (`FCR31.FS`).
    pub flush_subnormals: bool,
}

impl Default for FpCtx {
    fn default() -> Self {
        Self {
            round: Round::NearestTiesToEven,
            flags: FpFlags::NONE,
            flush_subnormals: false,
        }
    }
}

impl FpCtx {
    /// Clears the accumulated exception flags.
    ///
    /// Called at the start of every instruction so the flags describe
    /// that instruction alone.
    pub fn clear_flags(&mut self) {
        self.flags = FpFlags::NONE;
    }

    /// Raises exception conditions directly.
    ///
    /// Comparisons and the min/max family detect their invalid cases
    /// outside the engine, so they report them here by hand.
    pub fn raise(&mut self, flags: FpFlags) {
        self.flags |= flags;
    }

    /// Selects the rounding mode for subsequent engine calls.
    pub fn set_rounding(&mut self, mode: RoundingMode) {
        self.round = mode.into();
    }

    /// Runs `scope` under a fixed rounding mode, then restores the
    /// previous mode.
    ///
    /// The fixed-mode conversions (`round`, `trunc`, `ceil`, `floor`)
    /// override the `FCR31.RM` selection for exactly one engine call;
    /// the register setting must be back in force before the result is
    /// committed, whether or not the call raised anything.
    ///
    /// # Arguments
    ///
    /// * `mode` - Rounding mode to apply inside the scope.
    /// * `scope` - Work to perform under the override.
    ///
    /// # Returns
    ///
    /// Whatever `scope` returns.
    pub fn with_rounding<T>(&mut self, mode: RoundingMode, scope: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.round;
        self.round = mode.into();
        let result = scope(self);
        self.round = saved;
        result
    }

    /// Accumulates an engine result's status and unwraps its value.
    pub fn absorb<T>(&mut self, result: StatusAnd<T>) -> T {
        if result.status != Status::OK {
            self.flags |= result.status.into();
        }
        result.value
    }

    /// Applies the operand side of subnormal flushing.
    ///
    /// With `FCR31.FS` set, subnormal operands participate as signed
    /// zero. Hardware notes the substitution in a condition MIPS does
    /// not expose, so no flag is raised here.
    pub fn flush_in<F: FpFormat>(&self, value: F) -> F {
        if self.flush_subnormals && value.is_denormal() {
            F::signed_zero(value.is_negative())
        } else {
            value
        }
    }

    /// Applies the result side of subnormal flushing and accumulates
    /// the engine status.
    ///
    /// A flushed result replaces whatever the engine produced, status
    /// included: the underflow and inexact conditions of the discarded
    /// subnormal never become architecturally visible.
    fn flush_out<F: FpFormat>(&mut self, mut result: StatusAnd<F>) -> F {
        if self.flush_subnormals && result.value.is_denormal() {
            return F::signed_zero(result.value.is_negative());
        }
        if self.overflowed_to_largest(result.status, result.value) {
            result.status |= Status::OVERFLOW;
        }
        self.absorb(result)
    }

    /// Detects an overflow the engine delivered as the largest finite
    /// value rather than an infinity.
    ///
    /// When the active mode rounds an overflowed result back toward
    /// zero, the engine reports only the inexact condition. MIPS raises
    /// overflow whenever the unbounded-exponent magnitude passes the
    /// format maximum, whichever value the mode then delivers. Under
    /// such a mode no in-range result rounds up to the largest
    /// magnitude, so the value itself identifies the overflow.
    fn overflowed_to_largest<F: FpFormat>(&self, status: Status, value: F) -> bool {
        if !status.contains(Status::INEXACT) || status.contains(Status::OVERFLOW) {
            return false;
        }
        if !value.is_largest() {
            return false;
        }
        match self.round {
            Round::TowardZero => true,
            Round::TowardPositive => value.is_negative(),
            Round::TowardNegative => !value.is_negative(),
            _ => false,
        }
    }

    /// Runs a two-operand engine primitive under the current mode.
    ///
    /// # Arguments
    ///
    /// * `a` - Left operand.
    /// * `b` - Right operand.
    /// * `op` - Engine primitive, for example [`Float::add_r`].
    ///
    /// # Returns
    ///
    /// The (possibly flushed) result value.
    pub fn binary<F: FpFormat>(&mut self, a: F, b: F, op: fn(F, F, Round) -> StatusAnd<F>) -> F {
        let a = self.flush_in(a);
        let b = self.flush_in(b);
        let result = op(a, b, self.round);
        self.flush_out(result)
    }

    /// Runs the fused multiply-add primitive: `a * b + c` with one
    /// rounding.
    pub fn muladd<F: FpFormat>(&mut self, a: F, b: F, c: F) -> F {
        let a = self.flush_in(a);
        let b = self.flush_in(b);
        let c = self.flush_in(c);
        let result = a.mul_add_r(b, c, self.round);
        self.flush_out(result)
    }

    /// Runs the square-root primitive.
    pub fn sqrt<F: FpFormat>(&mut self, a: F) -> F {
        let a = self.flush_in(a);
        let result = a.sqrt_r(self.round);
        self.flush_out(result)
    }

    /// Rounds a value to an integral value in the same format.
    pub fn round_to_int<F: FpFormat>(&mut self, a: F) -> F {
        let a = self.flush_in(a);
        let result = a.round_to_integral(self.round);
        self.flush_out(result)
    }

    /// Converts between the two floating-point formats.
    pub fn convert<F, T>(&mut self, value: F) -> T
    where
        F: FpFormat + FloatConvert<T>,
        T: FpFormat,
    {
        let value = self.flush_in(value);
        // ignored - all information comes from status.
        let mut loses_info = false;
        let result = value.convert_r(self.round, &mut loses_info);
        self.flush_out(result)
    }
}

/// Bit-level bridge between guest register words and engine values.
///
/// Extends [`Float`] with what the format-generic helpers need and the
/// engine does not provide: raw-bits conversion at the guest register
/// width, square root, and the architecture's default quiet NaN.
pub trait FpFormat: Float + Copy {
    /// Raw register representation of this format.
    type Bits: Copy;

    /// Reinterprets guest register bits as an engine value.
    fn from_raw(bits: Self::Bits) -> Self;

    /// Returns the engine value's guest register bits.
    fn to_raw(self) -> Self::Bits;

    /// Square root under the given rounding mode.
    fn sqrt_r(self, round: Round) -> StatusAnd<Self>;

    /// The same value with the NaN quiet bit forced on.
    ///
    /// Meaningful only for NaN inputs; min/max uses it to silence a
    /// propagated signalling operand.
    fn quieted(self) -> Self;

    /// Zero carrying the requested sign.
    fn signed_zero(negative: bool) -> Self;
}

impl FpFormat for Single {
    type Bits = u32;

    fn from_raw(bits: u32) -> Self {
        Self::from_bits(u128::from(bits))
    }

    fn to_raw(self) -> u32 {
        self.to_bits() as u32
    }

    fn sqrt_r(self, round: Round) -> StatusAnd<Self> {
        let (result, _iterations) = ieee_apsqrt::sqrt_accurate(self.to_raw(), round);
        result.map(Self::from_raw)
    }

    fn quieted(self) -> Self {
        Self::from_raw(self.to_raw() | 0x0040_0000)
    }

    fn signed_zero(negative: bool) -> Self {
        Self::from_raw(if negative { 0x8000_0000 } else { 0 })
    }
}

impl FpFormat for Double {
    type Bits = u64;

    fn from_raw(bits: u64) -> Self {
        Self::from_bits(u128::from(bits))
    }

    fn to_raw(self) -> u64 {
        self.to_bits() as u64
    }

    fn sqrt_r(self, round: Round) -> StatusAnd<Self> {
        let (result, _iterations) = ieee_apsqrt::sqrt_accurate(self.to_raw(), round);
        result.map(Self::from_raw)
    }

    fn quieted(self) -> Self {
        Self::from_raw(self.to_raw() | 0x0008_0000_0000_0000)
    }

    fn signed_zero(negative: bool) -> Self {
        Self::from_raw(if negative { 0x8000_0000_0000_0000 } else { 0 })
    }
}

/// Splits a paired-single register word into its (low, high) lanes.
#[inline]
pub fn split_ps(raw: u64) -> (u32, u32) {
    (raw as u32, (raw >> 32) as u32)
}

/// Packs low and high single-precision lanes into a paired-single
/// register word.
#[inline]
pub fn pack_ps(low: u32, high: u32) -> u64 {
    u64::from(low) | (u64::from(high) << 32)
}

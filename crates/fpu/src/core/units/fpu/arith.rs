//! Arithmetic operation catalog.
//!
//! One entry point per guest instruction family, from the four basic
//! operations up to fused multiply-add. Entries take operand register
//! bits, run the engine under the current execution context and commit
//! the raised conditions exactly once, so an instruction that traps
//! leaves no partial flag state behind.
//!
//! Three families deserve a note:
//!
//! - **Legacy multiply-add** (`madd`, `msub`, `nmadd`, `nmsub`) rounds
//!   the intermediate product before the addition. Only the release-6
//!   `maddf`/`msubf` pair fuses the two steps into one rounding.
//! - **Reciprocal steps** (`recip1`/`recip2`, `rsqrt1`/`rsqrt2`) are
//!   the MIPS-3D Newton-Raphson refinement pair. They are ordinary
//!   full-precision operations here; the reduced-precision latitude the
//!   architecture grants is not taken.
//! - **Sign-bit operations** (`abs`, `neg`) never touch the engine.
//!   They copy the operand with the sign bit cleared or inverted, NaN
//!   operands included, and raise nothing.

use std::cmp::Ordering;

use rustc_apfloat::ieee::{Double, Single};
use rustc_apfloat::{Float, Round, StatusAnd};

use crate::common::Trap;

use super::Fpu;
use super::exception_flags::FpFlags;
use super::softfp::{FpCtx, FpFormat, split_ps};

/// 1.0 in single precision, for the reciprocal family.
const ONE_F32: u32 = 0x3f80_0000;
/// 2.0 in single precision.
const TWO_F32: u32 = 0x4000_0000;
/// 1.0 in double precision.
const ONE_F64: u64 = 0x3ff0_0000_0000_0000;
/// 2.0 in double precision.
const TWO_F64: u64 = 0x4000_0000_0000_0000;

/// Sign bit of a single-precision word.
const SIGN_F32: u32 = 0x8000_0000;
/// Sign bit of a double-precision word.
const SIGN_F64: u64 = 0x8000_0000_0000_0000;
/// Sign bits of both paired-single lanes.
const SIGN_PS: u64 = 0x8000_0000_8000_0000;

/// Two-operand arithmetic selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithOp {
    /// `add.fmt`
    Add,
    /// `sub.fmt`
    Sub,
    /// `mul.fmt`
    Mul,
    /// `div.fmt`
    Div,
}

impl ArithOp {
    /// The engine primitive this selector stands for.
    fn primitive<F: Float>(self) -> fn(F, F, Round) -> StatusAnd<F> {
        match self {
            Self::Add => F::add_r,
            Self::Sub => F::sub_r,
            Self::Mul => F::mul_r,
            Self::Div => F::div_r,
        }
    }
}

/// Legacy multiply-add selector. The intermediate product is rounded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaddOp {
    /// `madd.fmt`: `fs * ft + fr`
    Madd,
    /// `msub.fmt`: `fs * ft - fr`
    Msub,
    /// `nmadd.fmt`: `-(fs * ft + fr)`
    Nmadd,
    /// `nmsub.fmt`: `-(fs * ft - fr)`
    Nmsub,
}

impl MaddOp {
    /// True when the accumulator is subtracted from the product.
    fn subtracts(self) -> bool {
        matches!(self, Self::Msub | Self::Nmsub)
    }

    /// True when the final result is sign-inverted.
    fn negates(self) -> bool {
        matches!(self, Self::Nmadd | Self::Nmsub)
    }
}

/// Release-6 fused multiply-add selector. One rounding for both steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FusedOp {
    /// `maddf.fmt`: `fd + fs * ft`
    Maddf,
    /// `msubf.fmt`: `fd - fs * ft`
    Msubf,
}

/// Release-6 minimum/maximum selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MinMaxOp {
    /// `min.fmt`: smaller signed value.
    Min,
    /// `max.fmt`: larger signed value.
    Max,
    /// `mina.fmt`: value of smaller magnitude.
    Mina,
    /// `maxa.fmt`: value of larger magnitude.
    Maxa,
}

impl MinMaxOp {
    /// True for the magnitude-comparing variants.
    fn by_magnitude(self) -> bool {
        matches!(self, Self::Mina | Self::Maxa)
    }

    /// True when the larger of the pair wins.
    fn picks_larger(self) -> bool {
        matches!(self, Self::Max | Self::Maxa)
    }
}

impl Fpu {
    /// Runs a two-operand single-precision operation.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the instruction, for the trap it may raise.
    /// * `op` - Which of the four basic operations to perform.
    /// * `fs` - Left operand bits.
    /// * `ft` - Right operand bits.
    ///
    /// # Returns
    ///
    /// The result bits, or the enabled floating-point exception.
    pub fn arith_s(&mut self, pc: u64, op: ArithOp, fs: u32, ft: u32) -> Result<u32, Trap> {
        self.scalar_op(pc, |ctx| {
            ctx.binary(Single::from_raw(fs), Single::from_raw(ft), op.primitive())
        })
    }

    /// [`Fpu::arith_s`] in double precision.
    pub fn arith_d(&mut self, pc: u64, op: ArithOp, fs: u64, ft: u64) -> Result<u64, Trap> {
        self.scalar_op(pc, |ctx| {
            ctx.binary(Double::from_raw(fs), Double::from_raw(ft), op.primitive())
        })
    }

    /// [`Fpu::arith_s`] on both paired-single lanes.
    ///
    /// The lanes are independent computations whose raised conditions
    /// merge into one commit; an enabled exception from either lane
    /// traps the whole instruction.
    pub fn arith_ps(&mut self, pc: u64, op: ArithOp, fs: u64, ft: u64) -> Result<u64, Trap> {
        self.require_paired_single(pc)?;
        let (fs_low, fs_high) = split_ps(fs);
        let (ft_low, ft_high) = split_ps(ft);
        self.paired_op(pc, |ctx| {
            let low = ctx.binary(
                Single::from_raw(fs_low),
                Single::from_raw(ft_low),
                op.primitive(),
            );
            let high = ctx.binary(
                Single::from_raw(fs_high),
                Single::from_raw(ft_high),
                op.primitive(),
            );
            (low, high)
        })
    }

    /// `sqrt.s`: single-precision square root.
    pub fn sqrt_s(&mut self, pc: u64, fs: u32) -> Result<u32, Trap> {
        self.scalar_op(pc, |ctx| ctx.sqrt(Single::from_raw(fs)))
    }

    /// `sqrt.d`: double-precision square root.
    pub fn sqrt_d(&mut self, pc: u64, fs: u64) -> Result<u64, Trap> {
        self.scalar_op(pc, |ctx| ctx.sqrt(Double::from_raw(fs)))
    }

    /// `abs.s`: copies the operand with the sign bit cleared.
    ///
    /// A sign-bit operation: NaN operands pass through unquieted and no
    /// condition is raised, matching the IEEE 754-2008 `abs` the
    /// architecture adopted.
    pub fn abs_s(&self, fs: u32) -> u32 {
        fs & !SIGN_F32
    }

    /// `abs.d`: [`Fpu::abs_s`] in double precision.
    pub fn abs_d(&self, fs: u64) -> u64 {
        fs & !SIGN_F64
    }

    /// `abs.ps`: [`Fpu::abs_s`] on both lanes.
    pub fn abs_ps(&self, pc: u64, fs: u64) -> Result<u64, Trap> {
        self.require_paired_single(pc)?;
        Ok(fs & !SIGN_PS)
    }

    /// `neg.s`: copies the operand with the sign bit inverted.
    ///
    /// A sign-bit operation, like [`Fpu::abs_s`].
    pub fn neg_s(&self, fs: u32) -> u32 {
        fs ^ SIGN_F32
    }

    /// `neg.d`: [`Fpu::neg_s`] in double precision.
    pub fn neg_d(&self, fs: u64) -> u64 {
        fs ^ SIGN_F64
    }

    /// `neg.ps`: [`Fpu::neg_s`] on both lanes.
    pub fn neg_ps(&self, pc: u64, fs: u64) -> Result<u64, Trap> {
        self.require_paired_single(pc)?;
        Ok(fs ^ SIGN_PS)
    }

    /// `recip.s`: full-precision reciprocal, computed as `1.0 / fs`.
    pub fn recip_s(&mut self, pc: u64, fs: u32) -> Result<u32, Trap> {
        self.scalar_op(pc, |ctx| {
            ctx.binary(Single::from_raw(ONE_F32), Single::from_raw(fs), Single::div_r)
        })
    }

    /// `recip.d`: [`Fpu::recip_s`] in double precision.
    pub fn recip_d(&mut self, pc: u64, fs: u64) -> Result<u64, Trap> {
        self.scalar_op(pc, |ctx| {
            ctx.binary(Double::from_raw(ONE_F64), Double::from_raw(fs), Double::div_r)
        })
    }

    /// `rsqrt.s`: full-precision reciprocal square root.
    pub fn rsqrt_s(&mut self, pc: u64, fs: u32) -> Result<u32, Trap> {
        self.scalar_op(pc, |ctx| {
            let root = ctx.sqrt(Single::from_raw(fs));
            ctx.binary(Single::from_raw(ONE_F32), root, Single::div_r)
        })
    }

    /// `rsqrt.d`: [`Fpu::rsqrt_s`] in double precision.
    pub fn rsqrt_d(&mut self, pc: u64, fs: u64) -> Result<u64, Trap> {
        self.scalar_op(pc, |ctx| {
            let root = ctx.sqrt(Double::from_raw(fs));
            ctx.binary(Double::from_raw(ONE_F64), root, Double::div_r)
        })
    }

    /// `recip1.s`: first MIPS-3D reciprocal step, a reciprocal here.
    pub fn recip1_s(&mut self, pc: u64, fs: u32) -> Result<u32, Trap> {
        self.require_mips3d(pc)?;
        self.recip_s(pc, fs)
    }

    /// `recip1.d`: [`Fpu::recip1_s`] in double precision.
    pub fn recip1_d(&mut self, pc: u64, fs: u64) -> Result<u64, Trap> {
        self.require_mips3d(pc)?;
        self.recip_d(pc, fs)
    }

    /// `recip1.ps`: [`Fpu::recip1_s`] on both lanes.
    pub fn recip1_ps(&mut self, pc: u64, fs: u64) -> Result<u64, Trap> {
        self.require_mips3d(pc)?;
        self.require_paired_single(pc)?;
        let (low, high) = split_ps(fs);
        self.paired_op(pc, |ctx| {
            let one = Single::from_raw(ONE_F32);
            (
                ctx.binary(one, Single::from_raw(low), Single::div_r),
                ctx.binary(one, Single::from_raw(high), Single::div_r),
            )
        })
    }

    /// `rsqrt1.s`: first MIPS-3D reciprocal square root step.
    pub fn rsqrt1_s(&mut self, pc: u64, fs: u32) -> Result<u32, Trap> {
        self.require_mips3d(pc)?;
        self.rsqrt_s(pc, fs)
    }

    /// `rsqrt1.d`: [`Fpu::rsqrt1_s`] in double precision.
    pub fn rsqrt1_d(&mut self, pc: u64, fs: u64) -> Result<u64, Trap> {
        self.require_mips3d(pc)?;
        self.rsqrt_d(pc, fs)
    }

    /// `rsqrt1.ps`: [`Fpu::rsqrt1_s`] on both lanes.
    pub fn rsqrt1_ps(&mut self, pc: u64, fs: u64) -> Result<u64, Trap> {
        self.require_mips3d(pc)?;
        self.require_paired_single(pc)?;
        let (low, high) = split_ps(fs);
        self.paired_op(pc, |ctx| {
            let root_low = ctx.sqrt(Single::from_raw(low));
            let root_high = ctx.sqrt(Single::from_raw(high));
            let one = Single::from_raw(ONE_F32);
            (
                ctx.binary(one, root_low, Single::div_r),
                ctx.binary(one, root_high, Single::div_r),
            )
        })
    }

    /// `recip2.s`: second MIPS-3D reciprocal step.
    ///
    /// Computes `-(fs * ft - 1.0)`, the Newton-Raphson residual of the
    /// approximation in `ft` against the operand in `fs`.
    pub fn recip2_s(&mut self, pc: u64, fs: u32, ft: u32) -> Result<u32, Trap> {
        self.require_mips3d(pc)?;
        self.scalar_op(pc, |ctx| {
            recip2_step(ctx, Single::from_raw(fs), Single::from_raw(ft), Single::from_raw(ONE_F32))
        })
    }

    /// `recip2.d`: [`Fpu::recip2_s`] in double precision.
    pub fn recip2_d(&mut self, pc: u64, fs: u64, ft: u64) -> Result<u64, Trap> {
        self.require_mips3d(pc)?;
        self.scalar_op(pc, |ctx| {
            recip2_step(ctx, Double::from_raw(fs), Double::from_raw(ft), Double::from_raw(ONE_F64))
        })
    }

    /// `recip2.ps`: [`Fpu::recip2_s`] on both lanes.
    pub fn recip2_ps(&mut self, pc: u64, fs: u64, ft: u64) -> Result<u64, Trap> {
        self.require_mips3d(pc)?;
        self.require_paired_single(pc)?;
        let (fs_low, fs_high) = split_ps(fs);
        let (ft_low, ft_high) = split_ps(ft);
        self.paired_op(pc, |ctx| {
            let one = Single::from_raw(ONE_F32);
            (
                recip2_step(ctx, Single::from_raw(fs_low), Single::from_raw(ft_low), one),
                recip2_step(ctx, Single::from_raw(fs_high), Single::from_raw(ft_high), one),
            )
        })
    }

    /// `rsqrt2.s`: second MIPS-3D reciprocal square root step.
    ///
    /// Computes `-((fs * ft - 1.0) / 2.0)`, the halved residual the
    /// refinement sequence multiplies back in.
    pub fn rsqrt2_s(&mut self, pc: u64, fs: u32, ft: u32) -> Result<u32, Trap> {
        self.require_mips3d(pc)?;
        self.scalar_op(pc, |ctx| {
            rsqrt2_step(
                ctx,
                Single::from_raw(fs),
                Single::from_raw(ft),
                Single::from_raw(ONE_F32),
                Single::from_raw(TWO_F32),
            )
        })
    }

    /// `rsqrt2.d`: [`Fpu::rsqrt2_s`] in double precision.
    pub fn rsqrt2_d(&mut self, pc: u64, fs: u64, ft: u64) -> Result<u64, Trap> {
        self.require_mips3d(pc)?;
        self.scalar_op(pc, |ctx| {
            rsqrt2_step(
                ctx,
                Double::from_raw(fs),
                Double::from_raw(ft),
                Double::from_raw(ONE_F64),
                Double::from_raw(TWO_F64),
            )
        })
    }

    /// `rsqrt2.ps`: [`Fpu::rsqrt2_s`] on both lanes.
    pub fn rsqrt2_ps(&mut self, pc: u64, fs: u64, ft: u64) -> Result<u64, Trap> {
        self.require_mips3d(pc)?;
        self.require_paired_single(pc)?;
        let (fs_low, fs_high) = split_ps(fs);
        let (ft_low, ft_high) = split_ps(ft);
        self.paired_op(pc, |ctx| {
            let one = Single::from_raw(ONE_F32);
            let two = Single::from_raw(TWO_F32);
            (
                rsqrt2_step(ctx, Single::from_raw(fs_low), Single::from_raw(ft_low), one, two),
                rsqrt2_step(ctx, Single::from_raw(fs_high), Single::from_raw(ft_high), one, two),
            )
        })
    }

    /// `addr.ps`: MIPS-3D cross-lane reduction add.
    ///
    /// The result's low lane is `fs.low + fs.high` and its high lane is
    /// `ft.low + ft.high`; each operand reduces into one lane.
    pub fn addr_ps(&mut self, pc: u64, fs: u64, ft: u64) -> Result<u64, Trap> {
        self.require_mips3d(pc)?;
        self.require_paired_single(pc)?;
        let (fs_low, fs_high) = split_ps(fs);
        let (ft_low, ft_high) = split_ps(ft);
        self.paired_op(pc, |ctx| {
            (
                ctx.binary(Single::from_raw(fs_low), Single::from_raw(fs_high), Single::add_r),
                ctx.binary(Single::from_raw(ft_low), Single::from_raw(ft_high), Single::add_r),
            )
        })
    }

    /// `mulr.ps`: MIPS-3D cross-lane reduction multiply, shaped like
    /// [`Fpu::addr_ps`].
    pub fn mulr_ps(&mut self, pc: u64, fs: u64, ft: u64) -> Result<u64, Trap> {
        self.require_mips3d(pc)?;
        self.require_paired_single(pc)?;
        let (fs_low, fs_high) = split_ps(fs);
        let (ft_low, ft_high) = split_ps(ft);
        self.paired_op(pc, |ctx| {
            (
                ctx.binary(Single::from_raw(fs_low), Single::from_raw(fs_high), Single::mul_r),
                ctx.binary(Single::from_raw(ft_low), Single::from_raw(ft_high), Single::mul_r),
            )
        })
    }

    /// Runs a legacy single-precision multiply-add.
    ///
    /// Two engine operations with two roundings: the product commits to
    /// single precision before the accumulator is applied. The final
    /// negation of the `nmadd`/`nmsub` forms is a pure sign flip.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the instruction, for the trap it may raise.
    /// * `op` - Which of the four multiply-add forms to perform.
    /// * `fs` - Multiplicand bits.
    /// * `ft` - Multiplier bits.
    /// * `fr` - Accumulator bits.
    ///
    /// # Returns
    ///
    /// The result bits, or the enabled floating-point exception.
    pub fn madd_s(&mut self, pc: u64, op: MaddOp, fs: u32, ft: u32, fr: u32) -> Result<u32, Trap> {
        self.require_legacy(pc)?;
        self.scalar_op(pc, |ctx| {
            madd_steps(ctx, op, Single::from_raw(fs), Single::from_raw(ft), Single::from_raw(fr))
        })
    }

    /// [`Fpu::madd_s`] in double precision.
    pub fn madd_d(&mut self, pc: u64, op: MaddOp, fs: u64, ft: u64, fr: u64) -> Result<u64, Trap> {
        self.require_legacy(pc)?;
        self.scalar_op(pc, |ctx| {
            madd_steps(ctx, op, Double::from_raw(fs), Double::from_raw(ft), Double::from_raw(fr))
        })
    }

    /// [`Fpu::madd_s`] on both paired-single lanes.
    pub fn madd_ps(&mut self, pc: u64, op: MaddOp, fs: u64, ft: u64, fr: u64) -> Result<u64, Trap> {
        self.require_paired_single(pc)?;
        let (fs_low, fs_high) = split_ps(fs);
        let (ft_low, ft_high) = split_ps(ft);
        let (fr_low, fr_high) = split_ps(fr);
        self.paired_op(pc, |ctx| {
            let low = madd_steps(
                ctx,
                op,
                Single::from_raw(fs_low),
                Single::from_raw(ft_low),
                Single::from_raw(fr_low),
            );
            let high = madd_steps(
                ctx,
                op,
                Single::from_raw(fs_high),
                Single::from_raw(ft_high),
                Single::from_raw(fr_high),
            );
            (low, high)
        })
    }

    /// Runs a release-6 fused multiply-add into the destination.
    ///
    /// `maddf` computes `fd + fs * ft` and `msubf` computes
    /// `fd - fs * ft`, each with a single rounding of the exact result.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the instruction, for the trap it may raise.
    /// * `op` - Fused form to perform.
    /// * `fs` - Multiplicand bits.
    /// * `ft` - Multiplier bits.
    /// * `fd` - Previous destination value, serving as the accumulator.
    ///
    /// # Returns
    ///
    /// The result bits, or the enabled floating-point exception.
    pub fn maddf_s(
        &mut self,
        pc: u64,
        op: FusedOp,
        fs: u32,
        ft: u32,
        fd: u32,
    ) -> Result<u32, Trap> {
        self.require_release6(pc)?;
        let fs = match op {
            FusedOp::Maddf => Single::from_raw(fs),
            FusedOp::Msubf => -Single::from_raw(fs),
        };
        self.scalar_op(pc, |ctx| ctx.muladd(fs, Single::from_raw(ft), Single::from_raw(fd)))
    }

    /// [`Fpu::maddf_s`] in double precision.
    pub fn maddf_d(
        &mut self,
        pc: u64,
        op: FusedOp,
        fs: u64,
        ft: u64,
        fd: u64,
    ) -> Result<u64, Trap> {
        self.require_release6(pc)?;
        let fs = match op {
            FusedOp::Maddf => Double::from_raw(fs),
            FusedOp::Msubf => -Double::from_raw(fs),
        };
        self.scalar_op(pc, |ctx| ctx.muladd(fs, Double::from_raw(ft), Double::from_raw(fd)))
    }

    /// Runs a release-6 minimum/maximum selection.
    ///
    /// NaN handling follows the 2008 `minNum`/`maxNum` family: a quiet
    /// NaN paired with a number loses, two NaNs propagate a quieted
    /// NaN, and any signalling operand raises Invalid Operation. The
    /// magnitude variants fall back to the signed comparison when the
    /// magnitudes tie.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the instruction, for the trap it may raise.
    /// * `op` - Selection rule.
    /// * `fs` - Left operand bits.
    /// * `ft` - Right operand bits.
    ///
    /// # Returns
    ///
    /// The selected operand's bits, or the enabled exception.
    pub fn min_max_s(&mut self, pc: u64, op: MinMaxOp, fs: u32, ft: u32) -> Result<u32, Trap> {
        self.require_release6(pc)?;
        self.scalar_op(pc, |ctx| {
            min_max_select(ctx, op, Single::from_raw(fs), Single::from_raw(ft))
        })
    }

    /// [`Fpu::min_max_s`] in double precision.
    pub fn min_max_d(&mut self, pc: u64, op: MinMaxOp, fs: u64, ft: u64) -> Result<u64, Trap> {
        self.require_release6(pc)?;
        self.scalar_op(pc, |ctx| {
            min_max_select(ctx, op, Double::from_raw(fs), Double::from_raw(ft))
        })
    }

    /// `rint.s`: rounds to an integral value in the same format, under
    /// the current rounding mode. Release 6 only.
    pub fn rint_s(&mut self, pc: u64, fs: u32) -> Result<u32, Trap> {
        self.require_release6(pc)?;
        self.scalar_op(pc, |ctx| ctx.round_to_int(Single::from_raw(fs)))
    }

    /// `rint.d`: [`Fpu::rint_s`] in double precision.
    pub fn rint_d(&mut self, pc: u64, fs: u64) -> Result<u64, Trap> {
        self.require_release6(pc)?;
        self.scalar_op(pc, |ctx| ctx.round_to_int(Double::from_raw(fs)))
    }
}

/// `-(fs * ft - one)`, the shared body of the `recip2` forms.
fn recip2_step<F: FpFormat>(ctx: &mut FpCtx, fs: F, ft: F, one: F) -> F {
    let product = ctx.binary(fs, ft, F::mul_r);
    -ctx.binary(product, one, F::sub_r)
}

/// `-((fs * ft - one) / two)`, the shared body of the `rsqrt2` forms.
fn rsqrt2_step<F: FpFormat>(ctx: &mut FpCtx, fs: F, ft: F, one: F, two: F) -> F {
    let product = ctx.binary(fs, ft, F::mul_r);
    let residual = ctx.binary(product, one, F::sub_r);
    -ctx.binary(residual, two, F::div_r)
}

/// Product-then-accumulate body of the legacy multiply-add forms.
fn madd_steps<F: FpFormat>(ctx: &mut FpCtx, op: MaddOp, fs: F, ft: F, fr: F) -> F {
    let product = ctx.binary(fs, ft, F::mul_r);
    let accumulated = if op.subtracts() {
        ctx.binary(product, fr, F::sub_r)
    } else {
        ctx.binary(product, fr, F::add_r)
    };
    if op.negates() { -accumulated } else { accumulated }
}

/// Shared selection body of the min/max family.
fn min_max_select<F: FpFormat>(ctx: &mut FpCtx, op: MinMaxOp, a: F, b: F) -> F {
    let a = ctx.flush_in(a);
    let b = ctx.flush_in(b);
    if a.is_signaling() || b.is_signaling() {
        ctx.raise(FpFlags::INVALID);
        return propagate_nan(a, b);
    }
    if a.is_nan() {
        return if b.is_nan() { propagate_nan(a, b) } else { b };
    }
    if b.is_nan() {
        return a;
    }
    if op.by_magnitude() {
        let magnitude_a = if a.is_negative() { -a } else { a };
        let magnitude_b = if b.is_negative() { -b } else { b };
        match magnitude_a.partial_cmp(&magnitude_b) {
            Some(Ordering::Less) => return if op.picks_larger() { b } else { a },
            Some(Ordering::Greater) => return if op.picks_larger() { a } else { b },
            // Equal magnitudes fall back to the signed comparison.
            _ => {}
        }
    }
    if op.picks_larger() { a.maximum(b) } else { a.minimum(b) }
}

/// NaN propagation for the min/max family: prefer a signalling operand,
/// then the left one, and quieten whatever was chosen.
fn propagate_nan<F: FpFormat>(a: F, b: F) -> F {
    let chosen = if !a.is_signaling() && b.is_signaling() { b } else { a };
    chosen.quieted()
}

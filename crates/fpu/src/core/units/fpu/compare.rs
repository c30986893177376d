//! Comparison predicates.
//!
//! Every comparison, legacy or release 6, reduces to the same two
//! questions: which of the four IEEE relations hold between the
//! operands, and does the predicate treat quiet NaNs as an error. Each
//! predicate is therefore a [`PredicateDesc`]: a four-bit truth mask
//! over {unordered, equal, less, greater} plus a signalling marker, and
//! one evaluator serves all thirty-eight encodings.
//!
//! The two generations differ in how the verdict lands:
//!
//! - **Legacy** (`c.cond.fmt`) writes a condition code bit in `FCR31`.
//!   The paired form writes two, one per lane. A predicate that can
//!   never hold (`c.f`, `c.sf`) still evaluates for its side effects on
//!   the Invalid Operation condition.
//! - **Release 6** (`cmp.cond.fmt`) materializes an all-ones or
//!   all-zeros mask in the destination register.
//!
//! An enabled Invalid Operation traps before any verdict is written.

use std::cmp::Ordering;

use rustc_apfloat::ieee::{Double, Single};

use crate::common::Trap;

use super::Fpu;
use super::exception_flags::FpFlags;
use super::softfp::{FpCtx, FpFormat, split_ps};

/// Truth mask bit: the operands compare unordered.
const UNORDERED: u8 = 1 << 0;
/// Truth mask bit: the operands compare equal.
const EQUAL: u8 = 1 << 1;
/// Truth mask bit: the left operand is less.
const LESS: u8 = 1 << 2;
/// Truth mask bit: the left operand is greater.
const GREATER: u8 = 1 << 3;

/// One comparison predicate, reduced to data.
#[derive(Clone, Copy, Debug)]
struct PredicateDesc {
    /// Relations on which the predicate holds.
    mask: u8,
    /// Raise Invalid Operation for any NaN operand, not only
    /// signalling ones.
    signaling: bool,
}

impl PredicateDesc {
    const fn quiet(mask: u8) -> Self {
        Self {
            mask,
            signaling: false,
        }
    }

    const fn signaling(mask: u8) -> Self {
        Self {
            mask,
            signaling: true,
        }
    }
}

/// Legacy `c.cond.fmt` predicate. The first eight are quiet, the
/// second eight repeat the same truth masks with signalling NaN
/// handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CondPredicate {
    /// `c.f`: never holds.
    F,
    /// `c.un`: unordered.
    Un,
    /// `c.eq`: equal.
    Eq,
    /// `c.ueq`: unordered or equal.
    Ueq,
    /// `c.olt`: ordered and less.
    Olt,
    /// `c.ult`: unordered or less.
    Ult,
    /// `c.ole`: ordered and less or equal.
    Ole,
    /// `c.ule`: unordered, less or equal.
    Ule,
    /// `c.sf`: never holds, signalling.
    Sf,
    /// `c.ngle`: not greater, less or equal, signalling.
    Ngle,
    /// `c.seq`: equal, signalling.
    Seq,
    /// `c.ngl`: not greater or less, signalling.
    Ngl,
    /// `c.lt`: less, signalling.
    Lt,
    /// `c.nge`: not greater or equal, signalling.
    Nge,
    /// `c.le`: less or equal, signalling.
    Le,
    /// `c.ngt`: not greater, signalling.
    Ngt,
}

impl CondPredicate {
    fn descriptor(self) -> PredicateDesc {
        match self {
            Self::F => PredicateDesc::quiet(0),
            Self::Un => PredicateDesc::quiet(UNORDERED),
            Self::Eq => PredicateDesc::quiet(EQUAL),
            Self::Ueq => PredicateDesc::quiet(UNORDERED | EQUAL),
            Self::Olt => PredicateDesc::quiet(LESS),
            Self::Ult => PredicateDesc::quiet(UNORDERED | LESS),
            Self::Ole => PredicateDesc::quiet(LESS | EQUAL),
            Self::Ule => PredicateDesc::quiet(UNORDERED | LESS | EQUAL),
            Self::Sf => PredicateDesc::signaling(0),
            Self::Ngle => PredicateDesc::signaling(UNORDERED),
            Self::Seq => PredicateDesc::signaling(EQUAL),
            Self::Ngl => PredicateDesc::signaling(UNORDERED | EQUAL),
            Self::Lt => PredicateDesc::signaling(LESS),
            Self::Nge => PredicateDesc::signaling(UNORDERED | LESS),
            Self::Le => PredicateDesc::signaling(LESS | EQUAL),
            Self::Ngt => PredicateDesc::signaling(UNORDERED | LESS | EQUAL),
        }
    }
}

/// Release-6 `cmp.cond.fmt` predicate. Extends the legacy truth masks
/// with the ordered/not-equal family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CmpPredicate {
    /// `cmp.af`: never holds.
    Af,
    /// `cmp.un`: unordered.
    Un,
    /// `cmp.eq`: equal.
    Eq,
    /// `cmp.ueq`: unordered or equal.
    Ueq,
    /// `cmp.lt`: ordered and less.
    Lt,
    /// `cmp.ult`: unordered or less.
    Ult,
    /// `cmp.le`: ordered and less or equal.
    Le,
    /// `cmp.ule`: unordered, less or equal.
    Ule,
    /// `cmp.saf`: never holds, signalling.
    Saf,
    /// `cmp.sun`: unordered, signalling.
    Sun,
    /// `cmp.seq`: equal, signalling.
    Seq,
    /// `cmp.sueq`: unordered or equal, signalling.
    Sueq,
    /// `cmp.slt`: less, signalling.
    Slt,
    /// `cmp.sult`: unordered or less, signalling.
    Sult,
    /// `cmp.sle`: less or equal, signalling.
    Sle,
    /// `cmp.sule`: unordered, less or equal, signalling.
    Sule,
    /// `cmp.or`: ordered.
    Or,
    /// `cmp.une`: unordered or not equal.
    Une,
    /// `cmp.ne`: ordered and not equal.
    Ne,
    /// `cmp.sor`: ordered, signalling.
    Sor,
    /// `cmp.sune`: unordered or not equal, signalling.
    Sune,
    /// `cmp.sne`: ordered and not equal, signalling.
    Sne,
}

impl CmpPredicate {
    fn descriptor(self) -> PredicateDesc {
        match self {
            Self::Af => PredicateDesc::quiet(0),
            Self::Un => PredicateDesc::quiet(UNORDERED),
            Self::Eq => PredicateDesc::quiet(EQUAL),
            Self::Ueq => PredicateDesc::quiet(UNORDERED | EQUAL),
            Self::Lt => PredicateDesc::quiet(LESS),
            Self::Ult => PredicateDesc::quiet(UNORDERED | LESS),
            Self::Le => PredicateDesc::quiet(LESS | EQUAL),
            Self::Ule => PredicateDesc::quiet(UNORDERED | LESS | EQUAL),
            Self::Saf => PredicateDesc::signaling(0),
            Self::Sun => PredicateDesc::signaling(UNORDERED),
            Self::Seq => PredicateDesc::signaling(EQUAL),
            Self::Sueq => PredicateDesc::signaling(UNORDERED | EQUAL),
            Self::Slt => PredicateDesc::signaling(LESS),
            Self::Sult => PredicateDesc::signaling(UNORDERED | LESS),
            Self::Sle => PredicateDesc::signaling(LESS | EQUAL),
            Self::Sule => PredicateDesc::signaling(UNORDERED | LESS | EQUAL),
            Self::Or => PredicateDesc::quiet(LESS | EQUAL | GREATER),
            Self::Une => PredicateDesc::quiet(UNORDERED | LESS | GREATER),
            Self::Ne => PredicateDesc::quiet(LESS | GREATER),
            Self::Sor => PredicateDesc::signaling(LESS | EQUAL | GREATER),
            Self::Sune => PredicateDesc::signaling(UNORDERED | LESS | GREATER),
            Self::Sne => PredicateDesc::signaling(LESS | GREATER),
        }
    }
}

impl Fpu {
    /// Runs a legacy single-precision comparison into condition code
    /// `cc`.
    ///
    /// With `abs` set this is the MIPS-3D `cabs.cond.s`, comparing
    /// magnitudes by clearing both sign bits first.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the instruction, for the traps it may raise.
    /// * `predicate` - Condition to test.
    /// * `abs` - Compare absolute values.
    /// * `cc` - Condition code to write, 0 through 7.
    /// * `fs` - Left operand bits.
    /// * `ft` - Right operand bits.
    ///
    /// # Returns
    ///
    /// `Ok(())` once the condition code is written, or the enabled
    /// Invalid Operation exception, in which case no code is written.
    pub fn compare_s(
        &mut self,
        pc: u64,
        predicate: CondPredicate,
        abs: bool,
        cc: u32,
        fs: u32,
        ft: u32,
    ) -> Result<(), Trap> {
        let (fs, ft) = if abs {
            self.require_mips3d(pc)?;
            (self.abs_s(fs), self.abs_s(ft))
        } else {
            self.require_legacy(pc)?;
            (fs, ft)
        };
        let desc = predicate.descriptor();
        self.ctx.clear_flags();
        let truth = evaluate(&mut self.ctx, desc, Single::from_raw(fs), Single::from_raw(ft));
        self.commit_flags(pc)?;
        self.set_condition(cc, truth);
        Ok(())
    }

    /// [`Fpu::compare_s`] in double precision.
    pub fn compare_d(
        &mut self,
        pc: u64,
        predicate: CondPredicate,
        abs: bool,
        cc: u32,
        fs: u64,
        ft: u64,
    ) -> Result<(), Trap> {
        let (fs, ft) = if abs {
            self.require_mips3d(pc)?;
            (self.abs_d(fs), self.abs_d(ft))
        } else {
            self.require_legacy(pc)?;
            (fs, ft)
        };
        let desc = predicate.descriptor();
        self.ctx.clear_flags();
        let truth = evaluate(&mut self.ctx, desc, Double::from_raw(fs), Double::from_raw(ft));
        self.commit_flags(pc)?;
        self.set_condition(cc, truth);
        Ok(())
    }

    /// [`Fpu::compare_s`] on both paired-single lanes.
    ///
    /// The low lane's verdict lands in `cc` and the high lane's in
    /// `cc + 1`; the encoding restricts `cc` to even values. Both lanes
    /// evaluate before the shared commit, so an enabled exception from
    /// either leaves both codes untouched.
    pub fn compare_ps(
        &mut self,
        pc: u64,
        predicate: CondPredicate,
        abs: bool,
        cc: u32,
        fs: u64,
        ft: u64,
    ) -> Result<(), Trap> {
        let (fs, ft) = if abs {
            self.require_mips3d(pc)?;
            (self.abs_ps(pc, fs)?, self.abs_ps(pc, ft)?)
        } else {
            self.require_paired_single(pc)?;
            (fs, ft)
        };
        let desc = predicate.descriptor();
        let (fs_low, fs_high) = split_ps(fs);
        let (ft_low, ft_high) = split_ps(ft);
        self.ctx.clear_flags();
        let low = evaluate(
            &mut self.ctx,
            desc,
            Single::from_raw(fs_low),
            Single::from_raw(ft_low),
        );
        let high = evaluate(
            &mut self.ctx,
            desc,
            Single::from_raw(fs_high),
            Single::from_raw(ft_high),
        );
        self.commit_flags(pc)?;
        self.set_condition(cc, low);
        self.set_condition(cc + 1, high);
        Ok(())
    }

    /// Runs a release-6 single-precision comparison to a register mask.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the instruction, for the traps it may raise.
    /// * `predicate` - Condition to test.
    /// * `fs` - Left operand bits.
    /// * `ft` - Right operand bits.
    ///
    /// # Returns
    ///
    /// All-ones when the predicate holds, zero when it does not, or
    /// the enabled Invalid Operation exception.
    pub fn cmp_s(
        &mut self,
        pc: u64,
        predicate: CmpPredicate,
        fs: u32,
        ft: u32,
    ) -> Result<u32, Trap> {
        self.require_release6(pc)?;
        let desc = predicate.descriptor();
        self.value_op(pc, |ctx| {
            if evaluate(ctx, desc, Single::from_raw(fs), Single::from_raw(ft)) {
                u32::MAX
            } else {
                0
            }
        })
    }

    /// [`Fpu::cmp_s`] in double precision.
    pub fn cmp_d(
        &mut self,
        pc: u64,
        predicate: CmpPredicate,
        fs: u64,
        ft: u64,
    ) -> Result<u64, Trap> {
        self.require_release6(pc)?;
        let desc = predicate.descriptor();
        self.value_op(pc, |ctx| {
            if evaluate(ctx, desc, Double::from_raw(fs), Double::from_raw(ft)) {
                u64::MAX
            } else {
                0
            }
        })
    }
}

/// Evaluates one predicate over one operand pair.
///
/// Raises Invalid Operation per the descriptor's NaN policy, then tests
/// the relation the engine reports against the truth mask. Unordered
/// relations come out of the engine as `None`.
fn evaluate<F: FpFormat>(ctx: &mut FpCtx, desc: PredicateDesc, a: F, b: F) -> bool {
    let a = ctx.flush_in(a);
    let b = ctx.flush_in(b);
    let nan_involved = a.is_nan() || b.is_nan();
    if (desc.signaling && nan_involved) || a.is_signaling() || b.is_signaling() {
        ctx.raise(FpFlags::INVALID);
    }
    let relation = match a.partial_cmp(&b) {
        None => UNORDERED,
        Some(Ordering::Equal) => EQUAL,
        Some(Ordering::Less) => LESS,
        Some(Ordering::Greater) => GREATER,
    };
    desc.mask & relation != 0
}

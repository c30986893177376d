//! MIPS coprocessor 1 instruction semantics.
//!
//! This module implements the floating-point unit of the emulated core. It
//! provides:
//! 1. **Architectural State:** The `FCR0`/`FCR31` registers and the softfloat
//!    execution context derived from them.
//! 2. **Flag Translation:** Mapping engine exception conditions into the
//!    `FCR31` cause/enable/flag machinery, including the trap decision.
//! 3. **Operation Catalog:** Arithmetic, conversion, classification and
//!    comparison entry points, one per guest instruction family.
//! 4. **Feature Gating:** Reserved-instruction checks for paired-single,
//!    MIPS-3D and revision-specific encodings.
//!
//! Entry points take raw operand bit patterns plus the program counter of the
//! instruction and return either result bits or the trap to deliver. The unit
//! never touches guest memory or general-purpose registers.

/// Arithmetic operation catalog: add through fused multiply-add.
pub mod arith;

/// Release-6 value classification.
pub mod classify;

/// Condition-code and mask comparison predicates.
pub mod compare;

/// Control-register moves (`cfc1`/`ctc1`).
pub mod control;

/// Conversion catalog and the integer sentinel policies.
pub mod convert;

/// Floating-point exception flag accumulation.
pub mod exception_flags;

/// Rounding mode encoding and conversion.
pub mod rounding_modes;

/// Softfloat engine adapter: execution context and format bridge.
pub mod softfp;

pub use arith::{ArithOp, FusedOp, MaddOp, MinMaxOp};
pub use compare::{CmpPredicate, CondPredicate};
pub use convert::IntRounding;
pub use exception_flags::FpFlags;
pub use rounding_modes::RoundingMode;

use rustc_apfloat::ieee::Single;

use crate::common::Trap;
use crate::config::Config;
use crate::core::arch::fcr;

use softfp::{FpCtx, FpFormat, pack_ps};

/// Floating-point unit of one emulated core.
///
/// Owns the two architectural control registers and the softfloat execution
/// context derived from them. One instance exists per core; nothing here is
/// shared.
///
/// # Examples
///
/// ```
/// use mipsfpu_core::{ArithOp, Fpu};
///
/// let mut fpu = Fpu::default();
/// // 1.5 + 2.25 in single precision.
/// let sum = fpu.arith_s(0, ArithOp::Add, 0x3fc0_0000, 0x4010_0000).unwrap();
/// assert_eq!(sum, 0x4070_0000);
/// ```
#[derive(Clone, Debug)]
pub struct Fpu {
    /// Implementation register: capability bits, fixed at construction.
    fcr0: u32,
    /// Control and status register.
    fcr31: u32,
    /// Writable `FCR31` bits for moves through register index 31.
    rw_mask: u32,
    /// Release-6 instruction set selected.
    release6: bool,
    /// Live softfloat state derived from `FCR31`.
    ctx: FpCtx,
}

impl Fpu {
    /// Builds a unit from a model configuration.
    ///
    /// The capability register, the `FCR31` reset value and the index-31
    /// write mask are all derived from the configuration; `FCR31` then
    /// drives the initial rounding and flush state.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated model description.
    ///
    /// # Returns
    ///
    /// A unit in its architectural reset state.
    pub fn new(config: &Config) -> Self {
        let mut fpu = Self {
            fcr0: config.fcr0(),
            fcr31: config.fcr31_reset(),
            rw_mask: config.fcr31_rw_mask(),
            release6: config.is_release6(),
            ctx: FpCtx::default(),
        };
        fpu.restore_status();
        tracing::debug!(
            fcr0 = format_args!("{:#010x}", fpu.fcr0),
            fcr31 = format_args!("{:#010x}", fpu.fcr31),
            rw_mask = format_args!("{:#010x}", fpu.rw_mask),
            "fpu reset"
        );
        fpu
    }

    /// Returns the implementation register.
    pub fn fcr0(&self) -> u32 {
        self.fcr0
    }

    /// Returns the control and status register.
    pub fn fcr31(&self) -> u32 {
        self.fcr31
    }

    /// Returns true when the unit implements the release-6 instruction set.
    pub fn is_release6(&self) -> bool {
        self.release6
    }

    /// Returns the active rounding mode selected by `FCR31.RM`.
    pub fn rounding_mode(&self) -> RoundingMode {
        RoundingMode::from_fcr31(self.fcr31)
    }

    /// Reads condition code `cc`, as a branch on `bc1t`/`bc1f` would.
    ///
    /// # Arguments
    ///
    /// * `cc` - Condition code number, 0 through 7.
    ///
    /// # Returns
    ///
    /// The current value of the addressed condition code bit.
    pub fn condition_code(&self, cc: u32) -> bool {
        self.fcr31 & fcr::condition_bit(cc) != 0
    }

    /// Re-derives the execution context from `FCR31`.
    ///
    /// Applied at reset and after every accepted control-register write so
    /// the engine sees the new rounding and flush selections.
    fn restore_status(&mut self) {
        self.ctx.set_rounding(RoundingMode::from_fcr31(self.fcr31));
        self.ctx.flush_subnormals = self.fcr31 & fcr::FCR31_FS != 0;
    }

    /// Posts the accumulated engine flags to `FCR31` and decides the trap.
    ///
    /// The cause field is replaced outright, so an operation that raised
    /// nothing clears stale cause bits. When a raised condition meets its
    /// enable bit the instruction traps and the sticky flags keep their
    /// previous value; otherwise the condition accrues into the flags field.
    ///
    /// # Arguments
    ///
    /// * `pc` - Resumption address to carry in the trap.
    ///
    /// # Returns
    ///
    /// `Ok(())`, or the floating-point exception to deliver.
    fn commit_flags(&mut self, pc: u64) -> Result<(), Trap> {
        let cause = self.ctx.flags.to_cause_bits();
        self.fcr31 = fcr::set_cause(self.fcr31, cause);
        if cause != 0 {
            self.ctx.clear_flags();
            if fcr::enables(self.fcr31) & cause != 0 {
                tracing::trace!(
                    cause = format_args!("{cause:#x}"),
                    pc = format_args!("{pc:#x}"),
                    "enabled floating-point exception"
                );
                return Err(Trap::FloatingPointException(pc));
            }
            self.fcr31 = fcr::accumulate_flags(self.fcr31, cause);
        }
        Ok(())
    }

    /// Writes condition code `cc`.
    fn set_condition(&mut self, cc: u32, value: bool) {
        let bit = fcr::condition_bit(cc);
        if value {
            self.fcr31 |= bit;
        } else {
            self.fcr31 &= !bit;
        }
    }

    /// Runs one flag-producing operation: clear the accumulator, evaluate,
    /// translate the flags once.
    ///
    /// The closure performs every engine call the instruction needs; its
    /// value is returned untouched when no enabled exception fires.
    fn value_op<T>(&mut self, pc: u64, op: impl FnOnce(&mut FpCtx) -> T) -> Result<T, Trap> {
        self.ctx.clear_flags();
        let value = op(&mut self.ctx);
        self.commit_flags(pc)?;
        Ok(value)
    }

    /// [`Fpu::value_op`] for a scalar floating-point result, returned as
    /// register bits.
    fn scalar_op<F: FpFormat>(
        &mut self,
        pc: u64,
        op: impl FnOnce(&mut FpCtx) -> F,
    ) -> Result<F::Bits, Trap> {
        self.value_op(pc, |ctx| op(ctx).to_raw())
    }

    /// [`Fpu::value_op`] for a paired-single result: the closure produces
    /// both lanes, their flags translate as one set.
    fn paired_op(
        &mut self,
        pc: u64,
        op: impl FnOnce(&mut FpCtx) -> (Single, Single),
    ) -> Result<u64, Trap> {
        self.value_op(pc, |ctx| {
            let (low, high) = op(ctx);
            pack_ps(low.to_raw(), high.to_raw())
        })
    }

    /// Fails with `ReservedInstruction` unless paired-single operands are
    /// available (legacy model with `FCR0.PS`).
    fn require_paired_single(&self, pc: u64) -> Result<(), Trap> {
        if self.release6 || self.fcr0 & fcr::FCR0_PS == 0 {
            return Err(Trap::ReservedInstruction(pc));
        }
        Ok(())
    }

    /// Fails with `ReservedInstruction` unless the MIPS-3D approximation
    /// steps are available.
    fn require_mips3d(&self, pc: u64) -> Result<(), Trap> {
        if self.release6 || self.fcr0 & fcr::FCR0_3D == 0 {
            return Err(Trap::ReservedInstruction(pc));
        }
        Ok(())
    }

    /// Fails with `ReservedInstruction` on release-6 models; the legacy-only
    /// encodings were removed there.
    fn require_legacy(&self, pc: u64) -> Result<(), Trap> {
        if self.release6 {
            return Err(Trap::ReservedInstruction(pc));
        }
        Ok(())
    }

    /// Fails with `ReservedInstruction` on pre-release-6 models.
    fn require_release6(&self, pc: u64) -> Result<(), Trap> {
        if !self.release6 {
            return Err(Trap::ReservedInstruction(pc));
        }
        Ok(())
    }
}

impl Default for Fpu {
    /// Builds the full-featured legacy model.
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

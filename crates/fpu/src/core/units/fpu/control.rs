//! Control-register moves.
//!
//! `cfc1` and `ctc1` address a small register file of which only `FCR0`
//! and `FCR31` are real storage. The remaining indices are views and
//! aliases:
//!
//! | Index | View                                                  |
//! |-------|-------------------------------------------------------|
//! | 0     | Implementation register, read-only                    |
//! | 1, 4  | `UFR`/`UNFR`: user-mode `Status.FR` access            |
//! | 5, 6  | User-mode `Config5.FRE` access                        |
//! | 25    | Condition codes, packed contiguously                  |
//! | 26    | Cause and flag fields                                 |
//! | 28    | Enable fields, rounding mode and a relocated `FS` bit |
//! | 31    | Control and status register                           |
//!
//! The alias indices reach coprocessor-0 state the unit does not own,
//! so both moves borrow a [`Cp0Bridge`]. Writes through a partial view
//! leave the bits outside the view untouched, and every accepted write
//! re-derives the execution context and re-checks for a pending
//! enabled exception.

use crate::common::Trap;
use crate::core::arch::fcr;
use crate::core::arch::Cp0Bridge;

use super::Fpu;

impl Fpu {
    /// Reads a control register, as `cfc1` would.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the move, for the trap it may raise.
    /// * `cp0` - Coprocessor-0 state backing the alias indices.
    /// * `reg` - Control register index, 0 through 31.
    ///
    /// # Returns
    ///
    /// The register value, or `ReservedInstruction` for an alias index
    /// whose capability is present but disabled.
    pub fn read_control(&self, pc: u64, cp0: &Cp0Bridge, reg: u32) -> Result<u32, Trap> {
        let value = match reg {
            0 => self.fcr0,
            1 => {
                // UFR alias: reads Status.FR when user support is live.
                if self.fcr0 & fcr::FCR0_UFRP == 0 {
                    0
                } else if cp0.config5_ufr {
                    u32::from(cp0.status_fr)
                } else {
                    return Err(Trap::ReservedInstruction(pc));
                }
            }
            5 => {
                // FRE alias: reads Config5.FRE when user support is live.
                if self.fcr0 & fcr::FCR0_FREP == 0 {
                    0
                } else if cp0.config5_ufe {
                    u32::from(cp0.config5_fre)
                } else {
                    return Err(Trap::ReservedInstruction(pc));
                }
            }
            25 => fcr::condition_codes(self.fcr31),
            26 => self.fcr31 & 0x0003_f07c,
            28 => (self.fcr31 & 0x0000_0f83) | ((self.fcr31 >> 22) & 0x4),
            _ => self.fcr31,
        };
        tracing::trace!(reg, value = format_args!("{value:#010x}"), "control read");
        Ok(value)
    }

    /// Writes a control register, as `ctc1` would.
    ///
    /// The `UFR`/`UNFR` and `FRE` aliases respond only when the source
    /// register is `$zero`; the data value is ignored there and the
    /// move toggles coprocessor-0 state instead. Accepted writes to any
    /// `FCR31` view re-derive the rounding and flush state and deliver
    /// a floating-point exception if the stored cause field now meets
    /// an enable bit.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the move, for the traps it may raise.
    /// * `cp0` - Coprocessor-0 state backing the alias indices.
    /// * `reg` - Control register index, 0 through 31.
    /// * `value` - Data from the source general-purpose register.
    /// * `rt` - Index of that source register.
    ///
    /// # Returns
    ///
    /// `Ok(())`, `ReservedInstruction` for a disabled alias or an
    /// unknown index on release 6, or the pending exception a `FCR31`
    /// write uncovered.
    pub fn write_control(
        &mut self,
        pc: u64,
        cp0: &mut Cp0Bridge,
        reg: u32,
        value: u32,
        rt: u32,
    ) -> Result<(), Trap> {
        match reg {
            1 => {
                // UFR alias: clear Status.FR.
                if self.fcr0 & fcr::FCR0_UFRP == 0 || rt != 0 {
                    return Ok(());
                }
                if !cp0.config5_ufr {
                    return Err(Trap::ReservedInstruction(pc));
                }
                cp0.status_fr = false;
            }
            4 => {
                // UNFR alias: set Status.FR.
                if self.fcr0 & fcr::FCR0_UFRP == 0 || rt != 0 {
                    return Ok(());
                }
                if !cp0.config5_ufr {
                    return Err(Trap::ReservedInstruction(pc));
                }
                cp0.status_fr = true;
            }
            5 => {
                // FRE alias: clear Config5.FRE.
                if self.fcr0 & fcr::FCR0_FREP == 0 || rt != 0 {
                    return Ok(());
                }
                if !cp0.config5_ufe {
                    return Err(Trap::ReservedInstruction(pc));
                }
                cp0.config5_fre = false;
            }
            6 => {
                // FRE alias: set Config5.FRE.
                if self.fcr0 & fcr::FCR0_FREP == 0 || rt != 0 {
                    return Ok(());
                }
                if !cp0.config5_ufe {
                    return Err(Trap::ReservedInstruction(pc));
                }
                cp0.config5_fre = true;
            }
            25 => {
                // Condition codes; removed on release 6, and writes
                // with any high bit set are discarded whole.
                if self.release6 || value & 0xffff_ff00 != 0 {
                    return Ok(());
                }
                self.fcr31 = (self.fcr31 & 0x017f_ffff)
                    | ((value & 0xfe) << 24)
                    | ((value & 0x1) << 23);
            }
            26 => {
                // Cause and flag fields. The bits between them are
                // reserved; a write touching them is discarded whole.
                if value & 0x007c_0000 != 0 {
                    return Ok(());
                }
                self.fcr31 = (self.fcr31 & 0xfffc_0f83) | (value & 0x0003_f07c);
            }
            28 => {
                // Enables, rounding mode, and FS relocated to bit 2.
                if value & 0x007c_0000 != 0 {
                    return Ok(());
                }
                self.fcr31 =
                    (self.fcr31 & 0xfeff_f07c) | (value & 0x0000_0f83) | ((value & 0x4) << 22);
            }
            31 => {
                self.fcr31 = (value & self.rw_mask) | (self.fcr31 & !self.rw_mask);
            }
            _ => {
                if self.release6 {
                    return Err(Trap::ReservedInstruction(pc));
                }
                return Ok(());
            }
        }
        tracing::trace!(
            reg,
            fcr31 = format_args!("{:#010x}", self.fcr31),
            "control write"
        );
        self.restore_status();
        self.ctx.clear_flags();
        if (fcr::enables(self.fcr31) | fcr::FP_UNIMPLEMENTED) & fcr::cause(self.fcr31) != 0 {
            return Err(Trap::FloatingPointException(pc));
        }
        Ok(())
    }
}

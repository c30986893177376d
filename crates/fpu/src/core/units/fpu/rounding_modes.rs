//! Floating-point rounding mode support.
//!
//! MIPS encodes four rounding modes in the two-bit RM field of `FCR31`
//! (bits 1:0):
//!
//! | Value | Mode | Description                    |
//! |-------|------|--------------------------------|
//! | 0b00  | RN   | Round to Nearest, ties to Even |
//! | 0b01  | RZ   | Round towards Zero             |
//! | 0b10  | RP   | Round Up (towards +∞)          |
//! | 0b11  | RM   | Round Down (towards −∞)        |
//!
//! Unlike some other architectures there are no reserved encodings and
//! no per-instruction mode field; every encoding decodes to a mode, and
//! instructions that need a fixed mode (the `round`, `ceil` and `floor`
//! conversions) override the register setting for their own duration.

use rustc_apfloat::Round;

/// MIPS rounding mode encoding from `FCR31.RM`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum RoundingMode {
    /// Round to Nearest, ties to Even (default IEEE mode).
    Rn = 0b00,
    /// Round towards Zero.
    Rz = 0b01,
    /// Round Up (towards +∞).
    Rp = 0b10,
    /// Round Down (towards −∞).
    Rm = 0b11,
}

impl RoundingMode {
    /// Decodes the RM field of an `FCR31` value.
    ///
    /// All four encodings are architecturally defined, so decoding
    /// cannot fail.
    ///
    /// # Arguments
    ///
    /// * `fcr31` - Control and status register value to decode.
    ///
    /// # Returns
    ///
    /// The rounding mode selected by bits 1:0.
    pub fn from_fcr31(fcr31: u32) -> Self {
        match fcr31 & 0x3 {
            0b00 => Self::Rn,
            0b01 => Self::Rz,
            0b10 => Self::Rp,
            _ => Self::Rm,
        }
    }
}

impl From<RoundingMode> for Round {
    /// Maps the architectural encoding onto the softfloat engine's modes.
    fn from(mode: RoundingMode) -> Self {
        match mode {
            RoundingMode::Rn => Round::NearestTiesToEven,
            RoundingMode::Rz => Round::TowardZero,
            RoundingMode::Rp => Round::TowardPositive,
            RoundingMode::Rm => Round::TowardNegative,
        }
    }
}

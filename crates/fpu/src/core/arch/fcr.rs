//! Floating-point control register layout.
//!
//! MIPS coprocessor 1 exposes its state through a small set of control
//! registers. Two of them have architecturally fixed layouts that every
//! helper in this crate manipulates:
//!
//! `FCR0` (Floating-Point Implementation Register, read-only):
//!
//! | Bits  | Field    | Description                                 |
//! |-------|----------|---------------------------------------------|
//! | 29    | FREP     | `Config5.FRE` support is present            |
//! | 28    | UFRP     | User-mode FR switching is present           |
//! | 23    | HAS2008  | IEEE 754-2008 fields exist in `FCR31`       |
//! | 22    | F64      | Registers are 64 bits wide                  |
//! | 21    | L        | Long (64-bit integer) fixed-point format    |
//! | 20    | W        | Word (32-bit integer) fixed-point format    |
//! | 19    | 3D       | MIPS-3D ASE is implemented                  |
//! | 18    | PS       | Paired-single format is implemented         |
//! | 17    | D        | Double-precision format is implemented      |
//! | 16    | S        | Single-precision format is implemented      |
//! | 15:8  | PRID     | Processor identifier                        |
//! | 7:0   | REV      | Implementation revision                     |
//!
//! `FCR31` (Floating-Point Control and Status Register):
//!
//! | Bits  | Field    | Description                                 |
//! |-------|----------|---------------------------------------------|
//! | 31:25 | FCC7..1  | Condition codes 7 through 1                 |
//! | 24    | FS       | Flush subnormals to zero                    |
//! | 23    | FCC0     | Condition code 0                            |
//! | 19    | ABS2008  | 2008-style `abs`/`neg` (reflects FCR0)      |
//! | 18    | NAN2008  | 2008-style NaN handling                     |
//! | 17:12 | Cause    | Conditions raised by the last instruction   |
//! | 11:7  | Enables  | Conditions that trap instead of accrue      |
//! | 6:2   | Flags    | Sticky accrued conditions                   |
//! | 1:0   | RM       | Rounding mode                               |
//!
//! The Cause field carries one extra bit (E, unimplemented operation) that
//! has no counterpart in Enables or Flags and always traps when raised.

// ── FCR0 capability bits ──────────────────────────

/// Single-precision format is implemented.
pub const FCR0_S: u32 = 1 << 16;
/// Double-precision format is implemented.
pub const FCR0_D: u32 = 1 << 17;
/// Paired-single format is implemented.
pub const FCR0_PS: u32 = 1 << 18;
/// The MIPS-3D ASE is implemented.
pub const FCR0_3D: u32 = 1 << 19;
/// Word fixed-point format is implemented.
pub const FCR0_W: u32 = 1 << 20;
/// Long fixed-point format is implemented.
pub const FCR0_L: u32 = 1 << 21;
/// Floating-point registers are 64 bits wide.
pub const FCR0_F64: u32 = 1 << 22;
/// `FCR31` carries the IEEE 754-2008 NAN2008 and ABS2008 fields.
pub const FCR0_HAS2008: u32 = 1 << 23;
/// User-mode FR switching through `Config5.UFR` is present.
pub const FCR0_UFRP: u32 = 1 << 28;
/// The `Config5.FRE` emulation mode is present.
pub const FCR0_FREP: u32 = 1 << 29;

/// Shift of the processor identifier field in `FCR0`.
pub const FCR0_PRID_SHIFT: u32 = 8;
/// Shift of the revision field in `FCR0`.
pub const FCR0_REV_SHIFT: u32 = 0;

// ── FCR31 status bits ─────────────────────────────

/// 2008-style NaN handling: quiet bit set means quiet, conversions of
/// NaN operands produce zero.
pub const FCR31_NAN2008: u32 = 1 << 18;
/// 2008-style sign-bit semantics for `abs` and `neg`.
pub const FCR31_ABS2008: u32 = 1 << 19;
/// Condition code 0. Codes 1 through 7 live at bits 25 through 31.
pub const FCR31_FCC0: u32 = 1 << 23;
/// Flush subnormal operands and results to zero.
pub const FCR31_FS: u32 = 1 << 24;

/// Mask of the rounding-mode field at bits 1:0.
pub const FCR31_RM_MASK: u32 = 0x3;
/// Shift of the sticky Flags field.
pub const FCR31_FLAGS_SHIFT: u32 = 2;
/// Shift of the Enables field.
pub const FCR31_ENABLES_SHIFT: u32 = 7;
/// Shift of the Cause field.
pub const FCR31_CAUSE_SHIFT: u32 = 12;

// ── Exception condition encoding ──────────────────

/// Inexact result condition.
pub const FP_INEXACT: u32 = 1;
/// Underflow condition.
pub const FP_UNDERFLOW: u32 = 2;
/// Overflow condition.
pub const FP_OVERFLOW: u32 = 4;
/// Divide-by-zero condition.
pub const FP_DIV0: u32 = 8;
/// Invalid operation condition.
pub const FP_INVALID: u32 = 16;
/// Unimplemented operation. Exists only in the Cause field and traps
/// unconditionally when raised.
pub const FP_UNIMPLEMENTED: u32 = 32;

/// Extracts the six-bit Cause field.
///
/// # Arguments
///
/// * `fcr31` - Current control and status register value.
///
/// # Returns
///
/// The Cause field as a condition bit set, E in bit 5.
#[inline]
pub const fn cause(fcr31: u32) -> u32 {
    (fcr31 >> FCR31_CAUSE_SHIFT) & 0x3f
}

/// Extracts the five-bit Enables field.
///
/// # Arguments
///
/// * `fcr31` - Current control and status register value.
///
/// # Returns
///
/// The Enables field as a condition bit set.
#[inline]
pub const fn enables(fcr31: u32) -> u32 {
    (fcr31 >> FCR31_ENABLES_SHIFT) & 0x1f
}

/// Extracts the five-bit sticky Flags field.
///
/// # Arguments
///
/// * `fcr31` - Current control and status register value.
///
/// # Returns
///
/// The Flags field as a condition bit set.
#[inline]
pub const fn flags(fcr31: u32) -> u32 {
    (fcr31 >> FCR31_FLAGS_SHIFT) & 0x1f
}

/// Replaces the Cause field.
///
/// Unlike the sticky Flags field, Cause reports only the most recent
/// instruction, so the previous contents are discarded.
///
/// # Arguments
///
/// * `fcr31` - Current control and status register value.
/// * `cause` - New condition bit set, E in bit 5.
///
/// # Returns
///
/// The updated register value.
#[inline]
pub const fn set_cause(fcr31: u32, cause: u32) -> u32 {
    (fcr31 & !(0x3f << FCR31_CAUSE_SHIFT)) | ((cause & 0x3f) << FCR31_CAUSE_SHIFT)
}

/// Accrues condition bits into the sticky Flags field.
///
/// # Arguments
///
/// * `fcr31` - Current control and status register value.
/// * `flags` - Condition bit set to OR into Flags.
///
/// # Returns
///
/// The updated register value.
#[inline]
pub const fn accumulate_flags(fcr31: u32, flags: u32) -> u32 {
    fcr31 | ((flags & 0x1f) << FCR31_FLAGS_SHIFT)
}

/// Returns the `FCR31` mask selecting one condition code.
///
/// Code 0 sits at bit 23; codes 1 through 7 follow at bits 25 and up,
/// leaving bit 24 to the FS flush control. Only the low three bits of
/// `cc` take part, matching the width of the instruction field it is
/// decoded from.
///
/// # Arguments
///
/// * `cc` - Condition code number, 0 through 7.
///
/// # Returns
///
/// A single-bit mask for the requested code.
#[inline]
pub const fn condition_bit(cc: u32) -> u32 {
    let cc = cc & 0x7;
    if cc == 0 { FCR31_FCC0 } else { 1 << (24 + cc) }
}

/// Packs the eight condition codes into a contiguous byte.
///
/// # Arguments
///
/// * `fcr31` - Current control and status register value.
///
/// # Returns
///
/// Bits 7:0 holding FCC7 through FCC0.
#[inline]
pub const fn condition_codes(fcr31: u32) -> u32 {
    ((fcr31 >> 24) & 0xfe) | ((fcr31 >> 23) & 0x1)
}

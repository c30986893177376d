//! Coprocessor 0 state consulted by control-register moves.
//!
//! The floating-point unit does not own the system coprocessor, but a
//! handful of `cfc1`/`ctc1` encodings read or toggle CP0 bits: the
//! user-mode FR aliases flip `Status.FR`, and the FRE aliases flip
//! `Config5.FRE`. The surrounding CPU model lends those bits to the unit
//! through this bridge for the duration of one instruction.

/// CP0 fields visible to coprocessor 1 control moves.
///
/// The CPU model owns the real registers; it copies the relevant bits in
/// before executing a `cfc1` or `ctc1` and writes any changes back after.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cp0Bridge {
    /// `Status.FR`: floating-point register file is in 64-bit mode.
    pub status_fr: bool,
    /// `Config5.UFR`: user-mode writes to the FR aliases are permitted.
    pub config5_ufr: bool,
    /// `Config5.UFE`: user-mode writes to the FRE aliases are permitted.
    pub config5_ufe: bool,
    /// `Config5.FRE`: single-precision register accesses are emulated.
    pub config5_fre: bool,
}

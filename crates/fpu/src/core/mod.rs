//! Core processor components.
//!
//! This module contains the architecture-specific register definitions
//! and the execution units built on them. The instruction decoder and
//! register files live in the host emulator; everything here operates
//! on operand bit patterns it is handed.

/// Architecture-specific components (control registers, coprocessor-0
/// bridge).
pub mod arch;

/// Execution units (the floating-point unit).
pub mod units;

pub use self::units::Fpu;

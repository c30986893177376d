//! Execution units.
//!
//! This module contains the functional units of the emulated core. The
//! floating-point unit is the only one housed in this crate; integer
//! and memory units belong to the surrounding emulator.

/// Floating-Point Unit: coprocessor 1 instruction semantics.
pub mod fpu;

pub use self::fpu::Fpu;

//! MIPS floating-point unit instruction semantics.
//!
//! This crate implements coprocessor 1 of a MIPS core as a bit-exact,
//! self-contained library with the following:
//! 1. **Register model:** `FCR0`/`FCR31` with their cause, enable, flag
//!    and condition-code machinery, partial register views, and the
//!    user-mode coprocessor-0 aliases.
//! 2. **Operation catalog:** Arithmetic, conversion, classification and
//!    comparison semantics for single, double and paired-single
//!    operands, covering both the legacy and release-6 generations.
//! 3. **Exception model:** IEEE conditions accumulate per instruction
//!    and either trap (when enabled) or accrue into the sticky flags.
//! 4. **Configuration:** A serde-deserializable model description from
//!    which the registers, reset state and write masks derive.
//!
//! The crate holds no guest registers or memory: the surrounding
//! emulator decodes instructions and moves operand bits in and out.

/// Common types (traps, configuration errors).
pub mod common;
/// Unit model configuration (presets, validation, derived registers).
pub mod config;
/// Core components (control registers, coprocessor-0 bridge, the unit).
pub mod core;

/// Model description; use a preset or deserialize from JSON.
pub use crate::config::Config;
/// Configuration failure diagnoses.
pub use crate::common::ConfigError;
/// Traps an operation can deliver instead of a result.
pub use crate::common::Trap;
/// The floating-point unit; construct with [`Fpu::new`] from a [`Config`].
pub use crate::core::Fpu;
/// Coprocessor-0 state backing the user-mode control aliases.
pub use crate::core::arch::Cp0Bridge;
/// Operation selectors and flag types used by the dispatch surface.
pub use crate::core::units::fpu::{
    ArithOp, CmpPredicate, CondPredicate, FpFlags, FusedOp, IntRounding, MaddOp, MinMaxOp,
    RoundingMode,
};

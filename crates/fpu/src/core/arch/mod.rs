//! Architectural state definitions.
//!
//! This module defines the register-level view of the floating-point unit:
//! 1. **Control Registers:** The `FCR0`/`FCR31` layouts and field helpers.
//! 2. **Coprocessor 0 Bridge:** The CP0 bits control moves are allowed to touch.

/// Floating-point control register layout and field helpers.
pub mod fcr;

/// Coprocessor 0 state consulted by control-register moves.
pub mod cp0;

pub use cp0::Cp0Bridge;

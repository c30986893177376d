//! Trap and configuration error definitions.
//!
//! This module defines the error handling surface of the floating-point unit. It provides:
//! 1. **Trap Representation:** The synchronous exceptions a coprocessor 1 instruction can raise.
//! 2. **Configuration Errors:** Reporting malformed or inconsistent unit configurations.
//! 3. **Error Handling:** Integrating with standard Rust error traits for system-level reporting.

use std::fmt;

use thiserror::Error;

/// MIPS trap types raised by coprocessor 1 instructions.
///
/// Traps cause the processor to transfer control to the general exception
/// handler. Only the traps a floating-point instruction can produce are
/// represented here; the surrounding CPU model is expected to fold them
/// into its own exception machinery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trap {
    /// Reserved instruction exception.
    ///
    /// Raised when an instruction names a feature the unit does not
    /// implement, such as a paired-single operation without the PS
    /// capability bit or a `ctc1` to a register the current revision
    /// treats as reserved. The associated value is the program counter
    /// of the offending instruction.
    ReservedInstruction(u64),

    /// Floating-point exception.
    ///
    /// Raised when an IEEE exception condition occurs while the matching
    /// enable bit in `FCR31` is set. The associated value is the program
    /// counter to resume from; the cause field of `FCR31` identifies the
    /// condition.
    FloatingPointException(u64),
}

impl fmt::Display for Trap {
    /// Formats the trap for display.
    ///
    /// # Arguments
    ///
    /// * `f` - The formatter to write to.
    ///
    /// # Returns
    ///
    /// A formatting result indicating success or failure.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trap::ReservedInstruction(pc) => write!(f, "ReservedInstruction({:#x})", pc),
            Trap::FloatingPointException(pc) => write!(f, "FloatingPointException({:#x})", pc),
        }
    }
}

impl std::error::Error for Trap {}

/// Errors produced while loading or validating a unit configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document could not be parsed as JSON.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration describes a feature combination no real
    /// implementation supports. The associated message names the
    /// offending fields.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

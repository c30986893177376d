//! Shared definitions used across the floating-point unit.
//!
//! This module gathers the types every other part of the crate leans on:
//! 1. **Error Types:** Traps raised by instructions and configuration errors.

/// Trap and configuration error definitions.
pub mod error;

pub use error::{ConfigError, Trap};

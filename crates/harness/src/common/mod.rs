//! Common types shared by every stage of the harness.
//!
//! This module provides:
//! 1. **Bit Patterns:** The opaque binary32 pattern and its field-level classification.
//! 2. **Error Handling:** The fatal session errors and their diagnostics.

/// Binary32 bit patterns, field masks, and classification.
pub mod bits;

/// Fatal session errors.
pub mod error;

pub use bits::{F32Bits, FpClass};
pub use error::VerifyError;

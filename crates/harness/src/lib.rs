//! Randomized conformance checker for hardware binary32 multipliers.
//!
//! This crate drives a clocked floating-point multiplier through a valid/ready
//! style handshake and checks every result against a bit-exact model. It provides:
//! 1. **Bits:** Classification and construction of raw binary32 patterns.
//! 2. **Reference:** A correctly rounded (RNE) multiply built on exact integer arithmetic.
//! 3. **Stimulus:** Seeded operand generation with weighted NaN/Infinity injection.
//! 4. **Simulation:** A rising-edge scheduler, the DUT pin contract, and the handshake driver.
//! 5. **Session:** Trial orchestration, the equivalence policy, and statistics.

/// Check verdicts and the NaN-insensitive equivalence policy.
pub mod check;
/// Common types (bit patterns, classifications, errors).
pub mod common;
/// Session configuration (defaults, environment parsing).
pub mod config;
/// Device-under-test pin contract and a behavioral multiplier model.
pub mod dut;
/// Correctly rounded binary32 multiplication.
pub mod reference;
/// Trial orchestration.
pub mod session;
/// Clock, edge scheduler, and handshake driver.
pub mod sim;
/// Session statistics collection and reporting.
pub mod stats;
/// Operand generation.
pub mod stimulus;

/// Root configuration type; use `HarnessConfig::default()` or `HarnessConfig::from_env()`.
pub use crate::config::HarnessConfig;
/// Raw binary32 pattern and its classification.
pub use crate::common::{F32Bits, FpClass, VerifyError};
/// The DUT pin contract.
pub use crate::dut::Dut;
/// A randomized verification session; construct with `Session::new`.
pub use crate::session::{Session, SessionReport};

//! Cycle-level simulation of the DUT boundary.
//!
//! This module replaces an event-driven simulator kernel with an explicit scheduler:
//! 1. **Clock:** A free-running clock that only counts rising edges and simulated time.
//! 2. **Bench:** Owns the DUT and its input levels; advances time one rising edge at a time.
//! 3. **Driver:** The reset / stimulus / polling handshake state machine.
//!
//! Stimulus changes take effect at the next rising edge and outputs are sampled right
//! after an edge, never mid-cycle.

/// Edge scheduler owning the DUT.
pub mod bench;

/// Free-running clock.
pub mod clock;

/// Handshake state machine.
pub mod driver;

pub use bench::Bench;
pub use clock::Clock;
pub use driver::{HandshakeDriver, HandshakeState, RESET_CYCLES};

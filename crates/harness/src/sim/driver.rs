//! Handshake driver.
//!
//! The driver is the only writer of DUT inputs and the only reader of DUT outputs. It
//! walks a fixed state machine, one rising edge at a time:
//!
//! ```text
//! Reset -> Idle -> DriveStimulus -> Polling -> Captured -> Idle
//!                                           \-> TimedOut
//! ```
//!
//! - **Reset:** `rst` high for [`RESET_CYCLES`] edges, then one more edge with `rst` low.
//! - **DriveStimulus:** On the next edge `a`, `b` and `valid` are presented; `valid` is
//!   dropped again after exactly one edge.
//! - **Polling:** `out_valid` is checked once per edge, for at most `timeout_cycles` edges.
//! - **Captured:** `z` is latched on the first edge with `out_valid` high.
//! - **TimedOut:** The budget ran out; the transaction fails and the driver stays here
//!   until the next reset.

use tracing::trace;

use super::bench::Bench;
use crate::common::bits::F32Bits;
use crate::common::error::VerifyError;
use crate::dut::Dut;

/// Rising edges `rst` is held high during reset.
pub const RESET_CYCLES: u32 = 5;

/// Handshake driver states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandshakeState {
    /// Reset asserted or not yet performed.
    Reset,
    /// Ready for a transaction.
    Idle,
    /// Operands and `valid` on the bus.
    DriveStimulus,
    /// Waiting for `out_valid`.
    Polling {
        /// Edges polled so far.
        waited: u32,
    },
    /// Result latched.
    Captured(F32Bits),
    /// Polling budget exhausted.
    TimedOut,
}

/// Drives one transaction at a time through the DUT handshake.
#[derive(Debug)]
pub struct HandshakeDriver<D: Dut> {
    bench: Bench<D>,
    state: HandshakeState,
    timeout_cycles: u32,
}

impl<D: Dut> HandshakeDriver<D> {
    /// Creates a driver. No edge is issued until [`reset`](Self::reset).
    ///
    /// # Arguments
    ///
    /// * `bench` - Testbench owning the DUT.
    /// * `timeout_cycles` - Edges to poll for `out_valid` per transaction.
    pub const fn new(bench: Bench<D>, timeout_cycles: u32) -> Self {
        Self {
            bench,
            state: HandshakeState::Reset,
            timeout_cycles,
        }
    }

    /// Current state.
    pub const fn state(&self) -> HandshakeState {
        self.state
    }

    /// Polling budget per transaction.
    pub const fn timeout_cycles(&self) -> u32 {
        self.timeout_cycles
    }

    /// The underlying testbench.
    pub const fn bench(&self) -> &Bench<D> {
        &self.bench
    }

    /// Mutable access to the underlying testbench.
    pub fn bench_mut(&mut self) -> &mut Bench<D> {
        &mut self.bench
    }

    /// Releases the testbench.
    pub fn into_bench(self) -> Bench<D> {
        self.bench
    }

    fn enter(&mut self, next: HandshakeState) {
        trace!(
            cycle = self.bench.clock().edges(),
            from = ?self.state,
            to = ?next,
            "handshake transition"
        );
        self.state = next;
    }

    /// Resets the DUT and leaves the driver idle.
    pub fn reset(&mut self) {
        self.enter(HandshakeState::Reset);
        {
            let pins = self.bench.inputs_mut();
            pins.rst = true;
            pins.valid = false;
            pins.a = 0;
            pins.b = 0;
        }
        for _ in 0..RESET_CYCLES {
            let _ = self.bench.rising_edge();
        }
        self.bench.inputs_mut().rst = false;
        let _ = self.bench.rising_edge();
        self.enter(HandshakeState::Idle);
    }

    /// Submits one operand pair and waits for the result.
    ///
    /// # Arguments
    ///
    /// * `trial` - Trial index, carried into diagnostics.
    /// * `a` - Operand A.
    /// * `b` - Operand B.
    ///
    /// # Errors
    ///
    /// [`VerifyError::Protocol`] if the driver is not idle, or [`VerifyError::Timeout`]
    /// if `out_valid` is not seen within the polling budget.
    pub fn transact(
        &mut self,
        trial: usize,
        a: F32Bits,
        b: F32Bits,
    ) -> Result<F32Bits, VerifyError> {
        if self.state != HandshakeState::Idle {
            return Err(VerifyError::Protocol(format!(
                "transaction {trial} submitted in state {:?}",
                self.state
            )));
        }

        self.enter(HandshakeState::DriveStimulus);
        let _ = self.bench.rising_edge();
        {
            let pins = self.bench.inputs_mut();
            pins.a = a.bits();
            pins.b = b.bits();
            pins.valid = true;
        }
        let _ = self.bench.rising_edge();
        self.bench.inputs_mut().valid = false;

        self.enter(HandshakeState::Polling { waited: 0 });
        for waited in 1..=self.timeout_cycles {
            self.state = HandshakeState::Polling { waited };
            let out = self.bench.rising_edge();
            if out.out_valid {
                let z = F32Bits(out.z);
                self.enter(HandshakeState::Captured(z));
                self.enter(HandshakeState::Idle);
                return Ok(z);
            }
        }

        self.enter(HandshakeState::TimedOut);
        Err(VerifyError::Timeout {
            trial,
            cycles: self.timeout_cycles,
            a,
            b,
        })
    }
}

//! Edge scheduler owning the DUT.

use super::clock::Clock;
use crate::dut::{Dut, InputPins, OutputPins};

/// Testbench: the DUT, the levels currently driven onto its inputs, and the clock.
///
/// Input writes are held until the next call to [`Bench::rising_edge`], which is the
/// only place where simulated time advances.
#[derive(Debug)]
pub struct Bench<D: Dut> {
    dut: D,
    inputs: InputPins,
    clock: Clock,
}

impl<D: Dut> Bench<D> {
    /// Wraps a DUT with all inputs low.
    pub fn new(dut: D, clock: Clock) -> Self {
        Self {
            dut,
            inputs: InputPins::default(),
            clock,
        }
    }

    /// Waits for the next rising edge and returns the outputs sampled right after it.
    pub fn rising_edge(&mut self) -> OutputPins {
        self.dut.rising_edge(&self.inputs);
        self.clock.tick();
        self.dut.outputs()
    }

    /// Input levels for the next edge.
    pub fn inputs_mut(&mut self) -> &mut InputPins {
        &mut self.inputs
    }

    /// Input levels currently driven.
    pub const fn inputs(&self) -> &InputPins {
        &self.inputs
    }

    /// Output levels after the most recent edge.
    pub fn outputs(&self) -> OutputPins {
        self.dut.outputs()
    }

    /// The clock.
    pub const fn clock(&self) -> &Clock {
        &self.clock
    }

    /// The device under test.
    pub const fn dut(&self) -> &D {
        &self.dut
    }

    /// Mutable access to the device under test.
    pub fn dut_mut(&mut self) -> &mut D {
        &mut self.dut
    }

    /// Releases the DUT.
    pub fn into_dut(self) -> D {
        self.dut
    }
}

//! Behavioral binary32 multiplier.
//!
//! A cycle-level stand-in for the RTL multiplier, useful for exercising the harness
//! without an HDL simulator. It mirrors a typical iterative FPU datapath:
//! 1. **Accept:** On a rising edge with `valid` high and no operation in flight, the
//!    operands are latched.
//! 2. **Compute:** The result becomes visible `latency` edges later.
//! 3. **Retire:** `out_valid` is high for exactly one cycle.
//!
//! The arithmetic uses the host's IEEE multiply, independent of the reference model.
//! NaN results are canonicalized, and subnormal results can be flushed to a signed zero,
//! as many hardware multipliers do.

use super::{Dut, InputPins, OutputPins};
use crate::common::bits::{CANONICAL_NAN, F32Bits, SIGN_MASK};

/// One operation in flight.
#[derive(Clone, Copy, Debug)]
struct InFlight {
    /// Edges left before the result retires.
    remaining: u32,
    /// Result to publish on `z`.
    result: u32,
}

/// Latency-configurable multiplier model.
#[derive(Debug, Clone)]
pub struct BehavioralMultiplier {
    /// Edges between the sampling edge and `out_valid`.
    latency: u32,
    /// Replace subnormal results with a signed zero.
    flush_subnormals: bool,
    /// Operation in flight, if any.
    pending: Option<InFlight>,
    /// Registered `out_valid`.
    out_valid: bool,
    /// Registered `z`.
    z: u32,
}

impl BehavioralMultiplier {
    /// Creates a multiplier with the given latency.
    ///
    /// # Arguments
    ///
    /// * `latency` - Rising edges between accepting operands and raising `out_valid`.
    ///   A latency of 0 is treated as 1.
    pub fn new(latency: u32) -> Self {
        Self {
            latency: latency.max(1),
            flush_subnormals: true,
            pending: None,
            out_valid: false,
            z: 0,
        }
    }

    /// Keeps subnormal results instead of flushing them to zero.
    pub const fn with_gradual_underflow(mut self) -> Self {
        self.flush_subnormals = false;
        self
    }

    /// Configured latency in cycles.
    pub const fn latency(&self) -> u32 {
        self.latency
    }

    /// True while an operation is in flight.
    pub const fn busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Datapath: host multiply plus the output conventions of the model.
    fn compute(&self, a: u32, b: u32) -> u32 {
        let product = F32Bits((f32::from_bits(a) * f32::from_bits(b)).to_bits());
        if product.is_nan() {
            CANONICAL_NAN
        } else if self.flush_subnormals && product.is_subnormal() {
            product.bits() & SIGN_MASK
        } else {
            product.bits()
        }
    }
}

impl Default for BehavioralMultiplier {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Dut for BehavioralMultiplier {
    fn name(&self) -> &str {
        "fmultiplier"
    }

    fn rising_edge(&mut self, inputs: &InputPins) {
        if inputs.rst {
            self.pending = None;
            self.out_valid = false;
            self.z = 0;
            return;
        }

        self.out_valid = false;
        self.pending = match self.pending {
            Some(op) if op.remaining <= 1 => {
                self.out_valid = true;
                self.z = op.result;
                None
            }
            Some(op) => Some(InFlight {
                remaining: op.remaining - 1,
                ..op
            }),
            None if inputs.valid => Some(InFlight {
                remaining: self.latency,
                result: self.compute(inputs.a, inputs.b),
            }),
            None => None,
        };
    }

    fn outputs(&self) -> OutputPins {
        OutputPins {
            out_valid: self.out_valid,
            z: self.z,
        }
    }
}

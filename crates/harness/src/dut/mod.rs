//! Device-under-test pin contract.
//!
//! The DUT is a single-clock synchronous block. It samples [`InputPins`] on each rising
//! edge of `clk` and exposes [`OutputPins`] that are stable until the next edge:
//!
//! | Signal      | Dir | Width | Meaning                                         |
//! |-------------|-----|-------|-------------------------------------------------|
//! | `clk`       | in  | 1     | Free-running clock (modelled by `rising_edge`)  |
//! | `rst`       | in  | 1     | Synchronous reset, active high                  |
//! | `valid`     | in  | 1     | Pulsed for one cycle to submit `a` and `b`      |
//! | `a`, `b`    | in  | 32    | Binary32 operand patterns                       |
//! | `out_valid` | out | 1     | High for at least one cycle when `z` is valid   |
//! | `z`         | out | 32    | Binary32 result pattern                         |

/// Latency-configurable behavioral multiplier.
pub mod behavioral;

pub use behavioral::BehavioralMultiplier;

/// Values driven onto the DUT inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputPins {
    /// Synchronous reset.
    pub rst: bool,
    /// Operand-valid strobe.
    pub valid: bool,
    /// Operand A bus.
    pub a: u32,
    /// Operand B bus.
    pub b: u32,
}

/// Values observed on the DUT outputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutputPins {
    /// Result-valid flag.
    pub out_valid: bool,
    /// Result bus.
    pub z: u32,
}

/// Trait implemented by every device the harness can drive.
///
/// Implementors update their registered state in `rising_edge` only; `outputs` must be
/// a pure read of that state.
pub trait Dut {
    /// Returns a short name for this device (e.g., `"fmultiplier"`).
    fn name(&self) -> &str;

    /// Evaluates one rising edge of `clk` with the given input levels.
    fn rising_edge(&mut self, inputs: &InputPins);

    /// Current output levels.
    fn outputs(&self) -> OutputPins;
}

impl<D: Dut + ?Sized> Dut for Box<D> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn rising_edge(&mut self, inputs: &InputPins) {
        (**self).rising_edge(inputs);
    }

    fn outputs(&self) -> OutputPins {
        (**self).outputs()
    }
}

use fmulcheck_core::dut::{BehavioralMultiplier, Dut, InputPins, OutputPins};

/// Accepts operands but never raises `out_valid`.
#[derive(Debug, Default)]
pub struct StuckDut {
    pub edges: u64,
}

impl Dut for StuckDut {
    fn name(&self) -> &str {
        "stuck"
    }

    fn rising_edge(&mut self, _inputs: &InputPins) {
        self.edges += 1;
    }

    fn outputs(&self) -> OutputPins {
        OutputPins::default()
    }
}

/// Behavioral multiplier whose result bus has bit 0 stuck at the inverse value.
#[derive(Debug)]
pub struct CorruptingDut {
    inner: BehavioralMultiplier,
}

impl CorruptingDut {
    pub fn new(latency: u32) -> Self {
        Self {
            inner: BehavioralMultiplier::new(latency),
        }
    }
}

impl Dut for CorruptingDut {
    fn name(&self) -> &str {
        "corrupting"
    }

    fn rising_edge(&mut self, inputs: &InputPins) {
        self.inner.rising_edge(inputs);
    }

    fn outputs(&self) -> OutputPins {
        let out = self.inner.outputs();
        OutputPins {
            out_valid: out.out_valid,
            z: out.z ^ 1,
        }
    }
}

/// Records the input levels seen on every edge and replies after a fixed latency
/// with a constant result.
#[derive(Debug, Default)]
pub struct RecordingDut {
    pub seen: Vec<InputPins>,
    pub latency: u32,
    pub reply: u32,
    countdown: Option<u32>,
    out_valid: bool,
}

impl RecordingDut {
    pub fn new(latency: u32, reply: u32) -> Self {
        Self {
            latency,
            reply,
            ..Self::default()
        }
    }
}

impl Dut for RecordingDut {
    fn name(&self) -> &str {
        "recording"
    }

    fn rising_edge(&mut self, inputs: &InputPins) {
        self.seen.push(*inputs);
        self.out_valid = false;
        if inputs.rst {
            self.countdown = None;
            return;
        }
        self.countdown = match self.countdown {
            Some(n) if n <= 1 => {
                self.out_valid = true;
                None
            }
            Some(n) => Some(n - 1),
            None if inputs.valid => Some(self.latency.max(1)),
            None => None,
        };
    }

    fn outputs(&self) -> OutputPins {
        OutputPins {
            out_valid: self.out_valid,
            z: self.reply,
        }
    }
}

//! Free-running clock.

/// Counts rising edges of `clk` and converts them to simulated time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clock {
    /// Period in nanoseconds.
    period_ns: u64,
    /// Rising edges elapsed since time zero.
    edges: u64,
}

impl Clock {
    /// Creates a clock at time zero. A period of 0 is treated as 1 ns.
    pub fn new(period_ns: u64) -> Self {
        Self {
            period_ns: period_ns.max(1),
            edges: 0,
        }
    }

    /// Advances to the next rising edge.
    #[inline]
    pub fn tick(&mut self) {
        self.edges += 1;
    }

    /// Rising edges elapsed.
    #[inline]
    pub const fn edges(&self) -> u64 {
        self.edges
    }

    /// Clock period in nanoseconds.
    #[inline]
    pub const fn period_ns(&self) -> u64 {
        self.period_ns
    }

    /// Simulated time of the most recent rising edge.
    ///
    /// The clock starts low, so edge `n` happens half a period into cycle `n - 1`.
    pub const fn now_ns(&self) -> u64 {
        if self.edges == 0 {
            0
        } else {
            (self.edges - 1) * self.period_ns + self.period_ns / 2
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(10)
    }
}

//! Result comparison.
//!
//! Equivalence policy:
//! - Expected and observed both NaN (quiet or signaling, any sign or payload): pass.
//! - Otherwise the full 32-bit patterns must match, including the sign of zero and
//!   the sign of infinity.
//!
//! Subnormal expected results never reach the comparator; the orchestrator rejects
//! those operand pairs before they are driven.

use std::fmt;

use crate::common::bits::{F32Bits, FpClass};

/// One operand pair and its results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Trial index within the session.
    pub trial: usize,
    /// Operand A.
    pub operand_a: F32Bits,
    /// Operand B.
    pub operand_b: F32Bits,
    /// Reference result.
    pub expected: F32Bits,
    /// DUT result; `None` when the DUT never answered.
    pub observed: Option<F32Bits>,
}

impl Transaction {
    /// Applies the equivalence policy to this transaction.
    pub fn judge(&self) -> Verdict {
        match self.observed {
            Some(observed) if equivalent(self.expected, observed) => Verdict::Pass,
            observed => Verdict::Fail(Mismatch {
                trial: self.trial,
                operands: Some((self.operand_a, self.operand_b)),
                expected: self.expected,
                observed,
            }),
        }
    }
}

/// Outcome of a comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The DUT result is acceptable.
    Pass,
    /// The DUT result violates the policy.
    Fail(Mismatch),
}

impl Verdict {
    /// True for [`Verdict::Pass`].
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Equivalence policy on raw patterns.
pub const fn equivalent(expected: F32Bits, observed: F32Bits) -> bool {
    (expected.is_nan() && observed.is_nan()) || expected.bits() == observed.bits()
}

/// Judges a bare expected/observed pair. A failure carries no operands.
pub fn judge(expected: F32Bits, observed: F32Bits) -> Verdict {
    if equivalent(expected, observed) {
        Verdict::Pass
    } else {
        Verdict::Fail(Mismatch {
            trial: 0,
            operands: None,
            expected,
            observed: Some(observed),
        })
    }
}

/// Diagnostic for a failed comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mismatch {
    /// Trial index.
    pub trial: usize,
    /// Operands A and B, when the comparison came from a driven transaction.
    pub operands: Option<(F32Bits, F32Bits)>,
    /// Reference result.
    pub expected: F32Bits,
    /// DUT result, if any.
    pub observed: Option<F32Bits>,
}

impl Mismatch {
    /// Class of the reference result.
    pub const fn expected_class(&self) -> FpClass {
        self.expected.classify()
    }

    /// Class of the DUT result.
    pub fn observed_class(&self) -> Option<FpClass> {
        self.observed.map(F32Bits::classify)
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] mismatch", self.trial)?;
        if let Some((a, b)) = self.operands {
            writeln!(f, "  a={a} ({}) b={b} ({})", a.classify(), b.classify())?;
        }
        match self.observed {
            Some(got) => write!(
                f,
                "  exp={} ({}) got={} ({})",
                self.expected,
                self.expected.classify(),
                got,
                got.classify()
            ),
            None => write!(
                f,
                "  exp={} ({}) got=<none>",
                self.expected,
                self.expected.classify()
            ),
        }
    }
}

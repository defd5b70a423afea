//! Fatal session errors.
//!
//! Every variant aborts the whole session. Retries happen only inside operand
//! generation and never cross a transaction boundary.

use thiserror::Error;

use super::bits::F32Bits;
use crate::check::Mismatch;
use crate::config::ConfigError;

/// Errors that terminate a verification session.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The DUT never asserted `out_valid` within the polling budget.
    #[error("[{trial}] timeout waiting for out_valid after {cycles} cycles (a={a} b={b})")]
    Timeout {
        /// Trial index.
        trial: usize,
        /// Rising edges polled.
        cycles: u32,
        /// Operand A that was submitted.
        a: F32Bits,
        /// Operand B that was submitted.
        b: F32Bits,
    },

    /// No operand pair with a non-subnormal expected result was found.
    #[error("[{trial}] could not find non-subnormal expected result after {tries} tries")]
    GenerationExhausted {
        /// Trial index.
        trial: usize,
        /// Draws attempted.
        tries: u32,
    },

    /// Observed result differs from the reference under the equivalence policy.
    #[error("{0}")]
    Mismatch(Box<Mismatch>),

    /// The handshake driver was used out of order.
    #[error("handshake protocol violation: {0}")]
    Protocol(String),

    /// Session configuration could not be parsed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<Mismatch> for VerifyError {
    fn from(mismatch: Mismatch) -> Self {
        Self::Mismatch(Box::new(mismatch))
    }
}

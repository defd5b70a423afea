//! Correctly rounded binary32 multiplication.
//!
//! The model never touches host floating point. Each operand is decoded into an exact
//! integer form (`sig * 2^exp`), the 24x24-bit significands are multiplied into a
//! 48-bit integer, and the exact product is rounded once to binary32 with
//! round-to-nearest, ties-to-even. There is no intermediate format, so no double
//! rounding can occur.
//!
//! Special values follow IEEE 754:
//! - A NaN operand propagates, quietened (operand A wins when both are NaN).
//! - Infinity times zero is the canonical quiet NaN.
//! - Infinity times a nonzero value is an infinity with the XOR of the operand signs.
//! - Overflow produces a signed infinity; underflow rounds gradually through subnormals.

/// Rounding of exact integer products to binary32.
pub mod rounding;

use crate::common::bits::{EXP_BIAS, F32Bits, FpClass};

use self::rounding::round_to_f32;

/// Significand width including the hidden bit.
pub const SIG_BITS: u32 = 24;

/// Exponent of the least significant significand bit for a biased exponent of 1.
///
/// A normal value with biased exponent `e` is `sig * 2^(e - EXP_OFFSET)`.
pub const EXP_OFFSET: i32 = EXP_BIAS + (SIG_BITS as i32 - 1);

/// Exact decoded form of a binary32 pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unpacked {
    /// Signed zero.
    Zero {
        /// Sign bit.
        sign: bool,
    },
    /// Nonzero finite value equal to `sig * 2^exp`.
    Finite {
        /// Sign bit.
        sign: bool,
        /// Power of two scaling the integer significand.
        exp: i32,
        /// Integer significand, hidden bit included for normals.
        sig: u32,
    },
    /// Signed infinity.
    Infinity {
        /// Sign bit.
        sign: bool,
    },
    /// Any NaN; the mantissa is kept so the pattern survives a round trip.
    NaN {
        /// Sign bit.
        sign: bool,
        /// Raw mantissa field (nonzero).
        mantissa: u32,
    },
}

impl Unpacked {
    /// Decodes a pattern into its exact value.
    pub const fn decode(bits: F32Bits) -> Self {
        let sign = bits.sign();
        match bits.classify() {
            FpClass::Zero => Self::Zero { sign },
            FpClass::Subnormal => Self::Finite {
                sign,
                exp: 1 - EXP_OFFSET,
                sig: bits.mantissa(),
            },
            FpClass::Normal => Self::Finite {
                sign,
                exp: bits.exponent() as i32 - EXP_OFFSET,
                sig: bits.mantissa() | (1 << (SIG_BITS - 1)),
            },
            FpClass::Infinity => Self::Infinity { sign },
            FpClass::QuietNaN | FpClass::SignalingNaN => Self::NaN {
                sign,
                mantissa: bits.mantissa(),
            },
        }
    }

    /// Re-encodes the value. Finite values are rounded, which is exact for decoded input.
    pub fn encode(self) -> F32Bits {
        match self {
            Self::Zero { sign } => F32Bits::zero(sign),
            Self::Finite { sign, exp, sig } => round_to_f32(sign, exp, u64::from(sig)),
            Self::Infinity { sign } => F32Bits::infinity(sign),
            Self::NaN { sign, mantissa } => {
                F32Bits::from_fields(sign, crate::common::bits::EXP_SPECIAL, mantissa)
            }
        }
    }
}

/// Computes the correctly rounded binary32 product `a * b`.
///
/// # Examples
///
/// ```
/// use fmulcheck_core::F32Bits;
/// use fmulcheck_core::reference::multiply;
///
/// let two = multiply(F32Bits(0x3F80_0000), F32Bits(0x4000_0000));
/// assert_eq!(two, F32Bits(0x4000_0000));
///
/// let inf = multiply(F32Bits::MAX_FINITE, F32Bits::MAX_FINITE);
/// assert_eq!(inf, F32Bits(0x7F80_0000));
/// ```
pub fn multiply(a: F32Bits, b: F32Bits) -> F32Bits {
    let sign = a.sign() ^ b.sign();
    match (Unpacked::decode(a), Unpacked::decode(b)) {
        (Unpacked::NaN { .. }, _) => a.quieted(),
        (_, Unpacked::NaN { .. }) => b.quieted(),
        (Unpacked::Infinity { .. }, Unpacked::Zero { .. })
        | (Unpacked::Zero { .. }, Unpacked::Infinity { .. }) => F32Bits::CANONICAL_NAN,
        (Unpacked::Infinity { .. }, _) | (_, Unpacked::Infinity { .. }) => {
            F32Bits::infinity(sign)
        }
        (Unpacked::Zero { .. }, _) | (_, Unpacked::Zero { .. }) => F32Bits::zero(sign),
        (
            Unpacked::Finite {
                exp: exp_a,
                sig: sig_a,
                ..
            },
            Unpacked::Finite {
                exp: exp_b,
                sig: sig_b,
                ..
            },
        ) => round_to_f32(sign, exp_a + exp_b, u64::from(sig_a) * u64::from(sig_b)),
    }
}

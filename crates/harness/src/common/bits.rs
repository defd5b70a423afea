//! Raw binary32 bit patterns.
//!
//! Every value that crosses the DUT boundary is a plain 32-bit pattern. This module
//! interprets those patterns per the IEEE 754 binary32 layout without ever converting
//! to a host float:
//! 1. **Fields:** Sign (bit 31), biased exponent (bits 30..23), and mantissa (bits 22..0).
//! 2. **Classification:** Zero, subnormal, normal, infinity, and quiet/signaling NaN.
//! 3. **Construction:** Signed zeros, infinities, NaNs, and the overflow encoding.

use std::fmt;

/// Bit mask for the sign bit (bit 31).
pub const SIGN_MASK: u32 = 0x8000_0000;

/// Bit mask for the biased exponent field (bits 30..23).
pub const EXP_MASK: u32 = 0x7F80_0000;

/// Bit mask for the mantissa field (bits 22..0).
pub const MANT_MASK: u32 = 0x007F_FFFF;

/// Quiet bit of a NaN (most significant mantissa bit, bit 22).
pub const QUIET_BIT: u32 = 0x0040_0000;

/// Bit position of the exponent field.
pub const EXP_SHIFT: u32 = 23;

/// All-ones exponent used by infinities and NaNs.
pub const EXP_SPECIAL: u32 = 0xFF;

/// Largest exponent of a normal number.
pub const EXP_MAX_NORMAL: u32 = 0xFE;

/// Exponent bias.
pub const EXP_BIAS: i32 = 127;

/// Canonical quiet NaN (positive, quiet, zero payload).
pub const CANONICAL_NAN: u32 = 0x7FC0_0000;

/// IEEE 754 binary32 value classes, derived purely from the exponent and mantissa fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FpClass {
    /// Exponent and mantissa both zero.
    Zero,
    /// Exponent zero, mantissa nonzero.
    Subnormal,
    /// Exponent in `1..=254`.
    Normal,
    /// Exponent all ones, mantissa zero.
    Infinity,
    /// Exponent all ones, mantissa nonzero, bit 22 set.
    QuietNaN,
    /// Exponent all ones, mantissa nonzero, bit 22 clear.
    SignalingNaN,
}

impl FpClass {
    /// Returns true for both NaN kinds.
    #[inline]
    pub const fn is_nan(self) -> bool {
        matches!(self, Self::QuietNaN | Self::SignalingNaN)
    }

    /// Returns true for zeros, subnormals and normals.
    #[inline]
    pub const fn is_finite(self) -> bool {
        matches!(self, Self::Zero | Self::Subnormal | Self::Normal)
    }
}

impl fmt::Display for FpClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Zero => "zero",
            Self::Subnormal => "subnormal",
            Self::Normal => "normal",
            Self::Infinity => "inf",
            Self::QuietNaN => "qnan",
            Self::SignalingNaN => "snan",
        };
        f.write_str(name)
    }
}

/// An opaque binary32 bit pattern.
///
/// Equality is raw bit equality: `+0.0` and `-0.0` differ, and two NaNs are equal only
/// when every payload bit matches. Use [`crate::check::judge`] for the NaN-insensitive
/// comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct F32Bits(pub u32);

impl F32Bits {
    /// Largest finite magnitude, positive.
    pub const MAX_FINITE: Self = Self(0x7F7F_FFFF);
    /// Canonical quiet NaN.
    pub const CANONICAL_NAN: Self = Self(CANONICAL_NAN);

    /// Assembles a pattern from its three fields. Out-of-range field bits are masked off.
    #[inline]
    pub const fn from_fields(sign: bool, exponent: u32, mantissa: u32) -> Self {
        Self(
            ((sign as u32) << 31)
                | ((exponent & EXP_SPECIAL) << EXP_SHIFT)
                | (mantissa & MANT_MASK),
        )
    }

    /// Signed zero.
    #[inline]
    pub const fn zero(sign: bool) -> Self {
        Self::from_fields(sign, 0, 0)
    }

    /// Signed infinity.
    #[inline]
    pub const fn infinity(sign: bool) -> Self {
        Self::from_fields(sign, EXP_SPECIAL, 0)
    }

    /// Builds a NaN from a payload.
    ///
    /// The mantissa is forced nonzero. When `quiet` is set bit 22 is forced on; otherwise
    /// it is forced off, which always yields a signaling NaN.
    #[inline]
    pub const fn nan(sign: bool, quiet: bool, payload: u32) -> Self {
        let mant = if quiet {
            payload | QUIET_BIT | 1
        } else {
            (payload & !QUIET_BIT) | 1
        };
        Self::from_fields(sign, EXP_SPECIAL, mant)
    }

    /// Encoding for a result whose exact magnitude exceeds the binary32 range.
    ///
    /// Round-to-nearest always overflows to infinity, so this is the signed infinity
    /// carrying the mathematical sign of the product.
    #[inline]
    pub const fn overflow(sign: bool) -> Self {
        Self::infinity(sign)
    }

    /// Raw pattern.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Sign bit.
    #[inline]
    pub const fn sign(self) -> bool {
        self.0 & SIGN_MASK != 0
    }

    /// Biased exponent field.
    #[inline]
    pub const fn exponent(self) -> u32 {
        (self.0 & EXP_MASK) >> EXP_SHIFT
    }

    /// Mantissa (trailing significand) field.
    #[inline]
    pub const fn mantissa(self) -> u32 {
        self.0 & MANT_MASK
    }

    /// Classifies the pattern using only field masks.
    pub const fn classify(self) -> FpClass {
        let exp = self.exponent();
        let mant = self.mantissa();
        match (exp, mant) {
            (0, 0) => FpClass::Zero,
            (0, _) => FpClass::Subnormal,
            (EXP_SPECIAL, 0) => FpClass::Infinity,
            (EXP_SPECIAL, m) if m & QUIET_BIT != 0 => FpClass::QuietNaN,
            (EXP_SPECIAL, _) => FpClass::SignalingNaN,
            _ => FpClass::Normal,
        }
    }

    /// Returns true for quiet and signaling NaNs.
    #[inline]
    pub const fn is_nan(self) -> bool {
        self.exponent() == EXP_SPECIAL && self.mantissa() != 0
    }

    /// Returns true for nonzero values with an all-zero exponent.
    #[inline]
    pub const fn is_subnormal(self) -> bool {
        self.exponent() == 0 && self.mantissa() != 0
    }

    /// Returns true for `+0.0` and `-0.0`.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 & !SIGN_MASK == 0
    }

    /// Returns true for either signed infinity.
    #[inline]
    pub const fn is_infinite(self) -> bool {
        self.0 & !SIGN_MASK == EXP_MASK
    }

    /// Same pattern with the quiet bit forced on; non-NaN patterns are returned unchanged.
    #[inline]
    pub const fn quieted(self) -> Self {
        if self.is_nan() {
            Self(self.0 | QUIET_BIT)
        } else {
            self
        }
    }
}

impl From<u32> for F32Bits {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl From<F32Bits> for u32 {
    fn from(bits: F32Bits) -> Self {
        bits.0
    }
}

impl fmt::Display for F32Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl fmt::LowerHex for F32Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

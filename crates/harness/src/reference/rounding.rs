//! Round-to-nearest-even packing of exact values into binary32.

use crate::common::bits::{EXP_MASK, F32Bits, SIGN_MASK};

use super::{EXP_OFFSET, SIG_BITS};

/// Rounds the exact value `(-1)^sign * sig * 2^exp` to binary32 (RNE).
///
/// `sig` may carry up to 63 significant bits. Results below the normal range are
/// denormalized before rounding (gradual underflow); results above it become the
/// signed infinity from [`F32Bits::overflow`].
pub fn round_to_f32(sign: bool, exp: i32, sig: u64) -> F32Bits {
    if sig == 0 {
        return F32Bits::zero(sign);
    }

    let msb = 63 - sig.leading_zeros() as i32;
    // Right shift that leaves exactly SIG_BITS significant bits.
    let mut shift = msb - (SIG_BITS as i32 - 1);
    let mut biased = exp + shift + EXP_OFFSET;
    if biased < 1 {
        // Subnormal range: the exponent is pinned, the significand gives up bits.
        shift += 1 - biased;
        biased = 0;
    }

    let rounded = if shift <= 0 {
        sig << shift.unsigned_abs()
    } else {
        shift_right_rne(sig, shift.unsigned_abs())
    };

    // Adding the rounded significand (hidden bit included) to `biased - 1` lets a
    // rounding carry bump the exponent, and lets the largest subnormal round up into
    // the smallest normal.
    let magnitude = if biased == 0 {
        rounded
    } else {
        ((biased - 1) as u64) * (1 << (SIG_BITS - 1)) + rounded
    };

    if magnitude >= u64::from(EXP_MASK) {
        return F32Bits::overflow(sign);
    }

    let sign_bit = if sign { SIGN_MASK } else { 0 };
    F32Bits(sign_bit | magnitude as u32)
}

/// Shifts `value` right by `shift` bits, rounding to nearest with ties to even.
pub fn shift_right_rne(value: u64, shift: u32) -> u64 {
    match shift {
        0 => value,
        1..=63 => {
            let quotient = value >> shift;
            let remainder = value & ((1u64 << shift) - 1);
            let half = 1u64 << (shift - 1);
            if remainder > half || (remainder == half && quotient & 1 == 1) {
                quotient + 1
            } else {
                quotient
            }
        }
        64 => u64::from(value > 1 << 63),
        _ => 0,
    }
}

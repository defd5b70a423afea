//! Reference multiplier tests.
//!
//! Directed cases cover specials, rounding ties and gradual underflow. The properties
//! compare against the host's IEEE multiply and against the wider-format path
//! (`f64` product rounded once to `f32`), which must agree on every non-NaN result.

use fmulcheck_core::reference::{Unpacked, multiply};
use fmulcheck_core::{F32Bits, FpClass};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case::one_times_two(0x3F80_0000, 0x4000_0000, 0x4000_0000)]
#[case::inf_times_one(0x7F80_0000, 0x3F80_0000, 0x7F80_0000)]
#[case::negative_one(0xBF80_0000, 0x3F80_0000, 0xBF80_0000)]
#[case::max_squared_overflows(0x7F7F_FFFF, 0x7F7F_FFFF, 0x7F80_0000)]
#[case::negative_overflow(0xFF7F_FFFF, 0x4000_0000, 0xFF80_0000)]
#[case::signed_zero(0x8000_0000, 0x40A0_0000, 0x8000_0000)]
#[case::negative_infinities(0xFF80_0000, 0xC000_0000, 0x7F80_0000)]
#[case::round_half_ulp_down(0x3F80_0001, 0x3F80_0001, 0x3F80_0002)]
#[case::gradual_underflow(0x0080_0000, 0x3F00_0000, 0x0040_0000)]
#[case::tie_to_even_zero(0x0000_0001, 0x3F00_0000, 0x0000_0000)]
#[case::tie_to_even_up(0x0000_0003, 0x3F00_0000, 0x0000_0002)]
#[case::subnormal_to_min_normal(0x0000_0001, 0x4B00_0000, 0x0080_0000)]
fn directed_products(#[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(multiply(F32Bits(a), F32Bits(b)), F32Bits(expected));
}

#[test]
fn infinity_times_zero_is_nan() {
    let z = multiply(F32Bits(0x7F80_0000), F32Bits(0x0000_0000));
    assert!(z.is_nan());
    assert_eq!(z, F32Bits::CANONICAL_NAN);
    assert!(multiply(F32Bits(0x8000_0000), F32Bits(0xFF80_0000)).is_nan());
}

#[test]
fn nan_operands_propagate_quietened() {
    assert_eq!(
        multiply(F32Bits(0x7F80_0001), F32Bits(0x3F80_0000)),
        F32Bits(0x7FC0_0001)
    );
    assert_eq!(
        multiply(F32Bits(0x3F80_0000), F32Bits(0xFFA0_0000)),
        F32Bits(0xFFE0_0000)
    );
    assert_eq!(
        multiply(F32Bits(0x7FC0_1234), F32Bits(0xFF80_0001)),
        F32Bits(0x7FC0_1234)
    );
    assert_eq!(
        multiply(F32Bits(0x7F80_0000), F32Bits(0x7FC0_0000)).classify(),
        FpClass::QuietNaN
    );
}

#[test]
fn decode_exposes_exact_value() {
    assert_eq!(
        Unpacked::decode(F32Bits(0x3F80_0000)),
        Unpacked::Finite {
            sign: false,
            exp: -23,
            sig: 0x0080_0000,
        }
    );
    assert_eq!(
        Unpacked::decode(F32Bits(0x8000_0001)),
        Unpacked::Finite {
            sign: true,
            exp: -149,
            sig: 1,
        }
    );
    assert_eq!(
        Unpacked::decode(F32Bits(0xFF80_0000)),
        Unpacked::Infinity { sign: true }
    );
}

/// Finite nonzero patterns of either sign.
fn finite_nonzero() -> impl Strategy<Value = F32Bits> {
    any::<u32>()
        .prop_map(F32Bits)
        .prop_filter("finite and nonzero", |p| {
            p.classify().is_finite() && !p.is_zero()
        })
}

proptest! {
    #[test]
    fn decode_encode_round_trips(bits in any::<u32>()) {
        prop_assert_eq!(Unpacked::decode(F32Bits(bits)).encode(), F32Bits(bits));
    }

    #[test]
    fn agrees_with_host_multiply(a in any::<u32>(), b in any::<u32>()) {
        let ours = multiply(F32Bits(a), F32Bits(b));
        let host = F32Bits((f32::from_bits(a) * f32::from_bits(b)).to_bits());
        if host.is_nan() {
            prop_assert!(ours.is_nan());
        } else {
            prop_assert_eq!(ours, host);
        }
    }

    #[test]
    fn agrees_with_single_rounding_from_f64(a in any::<u32>(), b in any::<u32>()) {
        let ours = multiply(F32Bits(a), F32Bits(b));
        let wide = f64::from(f32::from_bits(a)) * f64::from(f32::from_bits(b));
        let narrowed = F32Bits((wide as f32).to_bits());
        if narrowed.is_nan() {
            prop_assert!(ours.is_nan());
        } else {
            prop_assert_eq!(ours, narrowed);
        }
    }

    #[test]
    fn sign_is_xor_for_finite_nonzero_operands(a in finite_nonzero(), b in finite_nonzero()) {
        let z = multiply(a, b);
        prop_assert!(!z.is_nan());
        prop_assert_eq!(z.sign(), a.sign() ^ b.sign());
    }

    #[test]
    fn large_products_overflow_to_signed_infinity(
        sa in any::<bool>(),
        sb in any::<bool>(),
        ea in 191u32..=254,
        eb in 191u32..=254,
        ma in 0u32..0x0080_0000,
        mb in 0u32..0x0080_0000,
    ) {
        let z = multiply(F32Bits::from_fields(sa, ea, ma), F32Bits::from_fields(sb, eb, mb));
        prop_assert_eq!(z, F32Bits::infinity(sa ^ sb));
    }

    #[test]
    fn nan_inputs_always_give_nan(payload in 1u32..0x0080_0000, b in any::<u32>()) {
        let nan = F32Bits::from_fields(false, 0xFF, payload);
        prop_assert!(multiply(nan, F32Bits(b)).is_nan());
        prop_assert!(multiply(F32Bits(b), nan).is_nan());
    }
}

//! Bit-pattern classification tests.

use fmulcheck_core::common::bits::{QUIET_BIT, SIGN_MASK};
use fmulcheck_core::{F32Bits, FpClass};
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case(0x0000_0000, FpClass::Zero)]
#[case(0x8000_0000, FpClass::Zero)]
#[case(0x0000_0001, FpClass::Subnormal)]
#[case(0x807F_FFFF, FpClass::Subnormal)]
#[case(0x0080_0000, FpClass::Normal)]
#[case(0x3F80_0000, FpClass::Normal)]
#[case(0xFF7F_FFFF, FpClass::Normal)]
#[case(0x7F80_0000, FpClass::Infinity)]
#[case(0xFF80_0000, FpClass::Infinity)]
#[case(0x7FC0_0000, FpClass::QuietNaN)]
#[case(0xFFC0_0001, FpClass::QuietNaN)]
#[case(0x7F80_0001, FpClass::SignalingNaN)]
#[case(0xFFBF_FFFF, FpClass::SignalingNaN)]
fn classifies_boundary_patterns(#[case] bits: u32, #[case] class: FpClass) {
    assert_eq!(F32Bits(bits).classify(), class);
}

#[test]
fn overflow_encoding_is_signed_infinity() {
    assert_eq!(F32Bits::overflow(false), F32Bits(0x7F80_0000));
    assert_eq!(F32Bits::overflow(true), F32Bits(0xFF80_0000));
}

#[test]
fn quieting_only_touches_nans() {
    assert_eq!(F32Bits(0x7F80_0001).quieted(), F32Bits(0x7FC0_0001));
    assert_eq!(F32Bits(0x7F80_0000).quieted(), F32Bits(0x7F80_0000));
    assert_eq!(F32Bits(0x3F80_0000).quieted(), F32Bits(0x3F80_0000));
}

proptest! {
    #[test]
    fn classification_agrees_with_host(bits in any::<u32>()) {
        let value = f32::from_bits(bits);
        let class = F32Bits(bits).classify();
        prop_assert_eq!(class.is_nan(), value.is_nan());
        prop_assert_eq!(class == FpClass::Infinity, value.is_infinite());
        prop_assert_eq!(class == FpClass::Zero, value == 0.0);
        prop_assert_eq!(class == FpClass::Subnormal, value.is_subnormal());
        prop_assert_eq!(class == FpClass::Normal, value.is_normal());
        if class.is_nan() {
            prop_assert_eq!(class == FpClass::QuietNaN, bits & QUIET_BIT != 0);
        }
    }

    #[test]
    fn fields_reassemble(bits in any::<u32>()) {
        let p = F32Bits(bits);
        prop_assert_eq!(F32Bits::from_fields(p.sign(), p.exponent(), p.mantissa()), p);
        prop_assert_eq!(p.sign(), bits & SIGN_MASK != 0);
    }

    #[test]
    fn nan_constructor_honours_quiet_flag(
        sign in any::<bool>(),
        quiet in any::<bool>(),
        payload in any::<u32>(),
    ) {
        let nan = F32Bits::nan(sign, quiet, payload);
        let expected = if quiet { FpClass::QuietNaN } else { FpClass::SignalingNaN };
        prop_assert_eq!(nan.classify(), expected);
        prop_assert_eq!(nan.sign(), sign);
    }
}

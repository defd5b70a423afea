//! Operand generation tests.

use std::collections::HashMap;

use fmulcheck_core::FpClass;
use fmulcheck_core::config::GenerationConfig;
use fmulcheck_core::stimulus::{OperandGenerator, OperandKind};
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn histogram(config: &GenerationConfig, seed: u64, draws: usize) -> HashMap<FpClass, usize> {
    let generator = OperandGenerator::new(config);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut counts = HashMap::new();
    for _ in 0..draws {
        *counts.entry(generator.generate(&mut rng).classify()).or_insert(0) += 1;
    }
    counts
}

fn specials(allow_nan: bool, allow_inf: bool, rate: f64, quiet_nan_only: bool) -> GenerationConfig {
    GenerationConfig {
        allow_nan,
        allow_inf,
        special_rate: rate,
        quiet_nan_only,
    }
}

#[test]
fn default_config_only_yields_normals() {
    let counts = histogram(&GenerationConfig::default(), 1, 10_000);
    assert_eq!(counts.get(&FpClass::Normal), Some(&10_000));
}

#[test]
fn normal_path_spans_the_full_exponent_range() {
    let generator = OperandGenerator::new(&GenerationConfig::default());
    let mut rng = StdRng::seed_from_u64(2);
    let (mut lo, mut hi) = (u32::MAX, 0);
    let (mut neg, mut pos) = (0usize, 0usize);
    for _ in 0..50_000 {
        let p = generator.generate(&mut rng);
        lo = lo.min(p.exponent());
        hi = hi.max(p.exponent());
        if p.sign() {
            neg += 1;
        } else {
            pos += 1;
        }
    }
    assert_eq!((lo, hi), (1, 254));
    assert!(neg > 20_000 && pos > 20_000);
}

#[test]
fn rate_one_yields_only_enabled_specials() {
    let counts = histogram(&specials(true, true, 1.0, true), 3, 10_000);
    let inf = counts.get(&FpClass::Infinity).copied().unwrap_or(0);
    let qnan = counts.get(&FpClass::QuietNaN).copied().unwrap_or(0);
    assert_eq!(inf + qnan, 10_000);
    assert!((4_000..6_000).contains(&inf), "inf share off: {inf}");
}

#[test]
fn signaling_nans_appear_when_not_restricted() {
    let counts = histogram(&specials(true, false, 1.0, false), 4, 10_000);
    let snan = counts.get(&FpClass::SignalingNaN).copied().unwrap_or(0);
    let qnan = counts.get(&FpClass::QuietNaN).copied().unwrap_or(0);
    assert_eq!(snan + qnan, 10_000);
    assert!((4_000..6_000).contains(&snan), "snan share off: {snan}");
}

#[test]
fn quiet_only_never_yields_signaling() {
    let counts = histogram(&specials(true, false, 1.0, true), 5, 10_000);
    assert_eq!(counts.get(&FpClass::SignalingNaN), None);
    assert_eq!(counts.get(&FpClass::QuietNaN), Some(&10_000));
}

#[test]
fn special_rate_controls_injection_frequency() {
    let counts = histogram(&specials(true, true, 0.25, true), 6, 20_000);
    let normal = counts.get(&FpClass::Normal).copied().unwrap_or(0);
    let special = 20_000 - normal;
    assert!((4_000..6_000).contains(&special), "special count off: {special}");
}

#[test]
fn zero_rate_disables_injection() {
    let counts = histogram(&specials(true, true, 0.0, false), 7, 5_000);
    assert_eq!(counts.get(&FpClass::Normal), Some(&5_000));
}

#[test]
fn same_seed_same_operands() {
    let generator = OperandGenerator::new(&specials(true, true, 0.3, false));
    let mut first = StdRng::seed_from_u64(99);
    let mut second = StdRng::seed_from_u64(99);
    for _ in 0..1_000 {
        assert_eq!(generator.generate(&mut first), generator.generate(&mut second));
    }
}

#[test]
fn kinds_draw_their_class() {
    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..100 {
        assert_eq!(OperandKind::Normal.draw(&mut rng).classify(), FpClass::Normal);
        assert_eq!(OperandKind::Infinity.draw(&mut rng).classify(), FpClass::Infinity);
        assert_eq!(OperandKind::QuietNaN.draw(&mut rng).classify(), FpClass::QuietNaN);
        assert_eq!(
            OperandKind::SignalingNaN.draw(&mut rng).classify(),
            FpClass::SignalingNaN
        );
    }
}

//! Operand generation.
//!
//! Operands are drawn from a closed set of kinds. With probability `special_rate` (and
//! only when at least one special kind is enabled) a special kind is sampled from a
//! weighted mix; otherwise a uniformly random normal pattern is produced. The normal
//! path draws the exponent from `1..=254`, so it never yields zeros, subnormals or
//! specials.
//!
//! All randomness comes from the caller-owned, seedable RNG.

use rand::Rng;
use rand::RngCore;
use rand::distributions::{Distribution, Standard, WeightedIndex};

use crate::common::bits::{EXP_MAX_NORMAL, F32Bits, MANT_MASK};
use crate::config::GenerationConfig;

/// Closed set of operand kinds the generator can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperandKind {
    /// Random sign, exponent in `1..=254`, random mantissa.
    Normal,
    /// Random-signed infinity.
    Infinity,
    /// Random-signed NaN with bit 22 set.
    QuietNaN,
    /// Random-signed NaN with bit 22 clear.
    SignalingNaN,
}

impl OperandKind {
    /// Builds a pattern of this kind from the RNG.
    pub fn draw<R: Rng + ?Sized>(self, rng: &mut R) -> F32Bits {
        let sign = rng.gen_bool(0.5);
        match self {
            Self::Normal => F32Bits::from_fields(
                sign,
                rng.gen_range(1..=EXP_MAX_NORMAL),
                rng.next_u32() & MANT_MASK,
            ),
            Self::Infinity => F32Bits::infinity(sign),
            Self::QuietNaN => F32Bits::nan(sign, true, rng.next_u32() & MANT_MASK),
            Self::SignalingNaN => F32Bits::nan(sign, false, rng.next_u32() & MANT_MASK),
        }
    }
}

/// Weighted sampler over the enabled special kinds.
#[derive(Debug, Clone)]
pub struct SpecialMix {
    kinds: Vec<OperandKind>,
    weights: Option<WeightedIndex<u32>>,
}

impl SpecialMix {
    /// Builds the mix from the generation switches.
    ///
    /// NaNs and infinities weigh the same. When signaling NaNs are allowed the NaN share
    /// is split evenly between quiet and signaling.
    pub fn from_config(config: &GenerationConfig) -> Self {
        let mut entries: Vec<(OperandKind, u32)> = Vec::with_capacity(3);
        if config.allow_nan {
            if config.quiet_nan_only {
                entries.push((OperandKind::QuietNaN, 2));
            } else {
                entries.push((OperandKind::QuietNaN, 1));
                entries.push((OperandKind::SignalingNaN, 1));
            }
        }
        if config.allow_inf {
            entries.push((OperandKind::Infinity, 2));
        }

        let weights = WeightedIndex::new(entries.iter().map(|&(_, w)| w)).ok();
        Self {
            kinds: entries.into_iter().map(|(kind, _)| kind).collect(),
            weights,
        }
    }

    /// True when no special kind is enabled.
    pub fn is_empty(&self) -> bool {
        self.weights.is_none()
    }

    /// Kinds in the mix.
    pub fn kinds(&self) -> &[OperandKind] {
        &self.kinds
    }

    /// Samples one special kind, or `None` for an empty mix.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<OperandKind> {
        self.weights
            .as_ref()
            .map(|weights| self.kinds[weights.sample(rng)])
    }
}

/// Produces operand patterns for one session.
#[derive(Debug, Clone)]
pub struct OperandGenerator {
    special_rate: f64,
    mix: SpecialMix,
}

impl OperandGenerator {
    /// Creates a generator for a fixed configuration.
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            special_rate: config.special_rate,
            mix: SpecialMix::from_config(config),
        }
    }

    /// The weighted special mix in use.
    pub fn mix(&self) -> &SpecialMix {
        &self.mix
    }

    /// Chooses the kind of the next operand.
    pub fn pick_kind<R: Rng + ?Sized>(&self, rng: &mut R) -> OperandKind {
        let u: f64 = Standard.sample(rng);
        if u < self.special_rate {
            self.mix.sample(rng).unwrap_or(OperandKind::Normal)
        } else {
            OperandKind::Normal
        }
    }

    /// Generates one operand pattern.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> F32Bits {
        self.pick_kind(rng).draw(rng)
    }
}

//! Configuration for a verification session.
//!
//! This module defines the session parameters and how they are sourced. It provides:
//! 1. **Defaults:** Trial counts, retry and timeout budgets, and injection rates.
//! 2. **Structures:** `GenerationConfig` (operand mix) nested in `HarnessConfig`.
//! 3. **Sources:** Environment variables (`ALLOW_NAN`, `SPECIAL_RATE`, ...), any key
//!    lookup, or JSON.
//!
//! A configuration is immutable once a session starts.

use serde::Deserialize;
use thiserror::Error;

/// Default configuration constants for the harness.
mod defaults {
    /// Trials per session.
    pub const TRIALS: usize = 500;

    /// Operand draws allowed per trial before giving up.
    pub const MAX_TRIES: u32 = 200;

    /// Rising edges polled for `out_valid` after a stimulus.
    pub const TIMEOUT_CYCLES: u32 = 100;

    /// Clock period in nanoseconds (only used to report simulated time).
    pub const CLOCK_PERIOD_NS: u64 = 10;

    /// Probability that a generated operand is a special value.
    pub const SPECIAL_RATE: f64 = 0.02;

    /// NaN operands are disabled unless requested.
    pub const ALLOW_NAN: bool = false;

    /// Infinity operands are disabled unless requested.
    pub const ALLOW_INF: bool = false;

    /// Injected NaNs are quiet unless requested otherwise.
    pub const QUIET_NAN_ONLY: bool = true;
}

/// Environment variable names recognized by [`HarnessConfig::from_env`].
pub mod keys {
    /// Enables NaN operand injection.
    pub const ALLOW_NAN: &str = "ALLOW_NAN";
    /// Enables infinity operand injection.
    pub const ALLOW_INF: &str = "ALLOW_INF";
    /// Probability of drawing a special operand.
    pub const SPECIAL_RATE: &str = "SPECIAL_RATE";
    /// Restricts injected NaNs to quiet NaNs.
    pub const QUIET_NAN_ONLY: &str = "QUIET_NAN_ONLY";
    /// RNG seed for replaying a session.
    pub const SEED: &str = "SEED";
    /// Trials per session.
    pub const TRIALS: &str = "TRIALS";
    /// Draw budget per trial.
    pub const MAX_TRIES: &str = "MAX_TRIES";
    /// Polling budget per transaction.
    pub const TIMEOUT_CYCLES: &str = "TIMEOUT_CYCLES";
}

/// Errors raised while building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A floating-point option did not parse.
    #[error("{key}: invalid number {value:?}")]
    InvalidFloat {
        /// Option name.
        key: &'static str,
        /// Raw value.
        value: String,
    },

    /// An integer option did not parse.
    #[error("{key}: invalid integer {value:?}")]
    InvalidInteger {
        /// Option name.
        key: &'static str,
        /// Raw value.
        value: String,
    },

    /// `special_rate` was not a probability.
    #[error("special_rate must be within [0, 1], got {0}")]
    RateOutOfRange(f64),

    /// JSON configuration was malformed.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Operand mix for the generator.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GenerationConfig {
    /// Allow NaN operands.
    #[serde(default = "GenerationConfig::default_allow_nan")]
    pub allow_nan: bool,

    /// Allow infinity operands.
    #[serde(default = "GenerationConfig::default_allow_inf")]
    pub allow_inf: bool,

    /// Probability in `[0, 1]` that an operand is special (when any special kind is allowed).
    #[serde(default = "GenerationConfig::default_special_rate")]
    pub special_rate: f64,

    /// Only inject quiet NaNs.
    #[serde(default = "GenerationConfig::default_quiet_nan_only")]
    pub quiet_nan_only: bool,
}

impl GenerationConfig {
    /// Returns the default NaN injection switch.
    fn default_allow_nan() -> bool {
        defaults::ALLOW_NAN
    }

    /// Returns the default infinity injection switch.
    fn default_allow_inf() -> bool {
        defaults::ALLOW_INF
    }

    /// Returns the default special-value probability.
    fn default_special_rate() -> f64 {
        defaults::SPECIAL_RATE
    }

    /// Returns the default quiet-NaN restriction.
    fn default_quiet_nan_only() -> bool {
        defaults::QUIET_NAN_ONLY
    }

    /// Rejects rates that are not finite probabilities.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.special_rate.is_finite() && (0.0..=1.0).contains(&self.special_rate) {
            Ok(())
        } else {
            Err(ConfigError::RateOutOfRange(self.special_rate))
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            allow_nan: defaults::ALLOW_NAN,
            allow_inf: defaults::ALLOW_INF,
            special_rate: defaults::SPECIAL_RATE,
            quiet_nan_only: defaults::QUIET_NAN_ONLY,
        }
    }
}

/// Root configuration for a session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HarnessConfig {
    /// Operand mix.
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Trials to run.
    #[serde(default = "HarnessConfig::default_trials")]
    pub trials: usize,

    /// Draws per trial before the session fails.
    #[serde(default = "HarnessConfig::default_max_tries")]
    pub max_tries: u32,

    /// Polling budget per transaction, in rising edges.
    #[serde(default = "HarnessConfig::default_timeout_cycles")]
    pub timeout_cycles: u32,

    /// Clock period used for reported simulated time.
    #[serde(default = "HarnessConfig::default_clock_period_ns")]
    pub clock_period_ns: u64,

    /// RNG seed; `None` draws one from OS entropy and logs it.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl HarnessConfig {
    /// Returns the default trial count.
    fn default_trials() -> usize {
        defaults::TRIALS
    }

    /// Returns the default draw budget.
    fn default_max_tries() -> u32 {
        defaults::MAX_TRIES
    }

    /// Returns the default polling budget.
    fn default_timeout_cycles() -> u32 {
        defaults::TIMEOUT_CYCLES
    }

    /// Returns the default clock period.
    fn default_clock_period_ns() -> u64 {
        defaults::CLOCK_PERIOD_NS
    }

    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup.
    ///
    /// Missing keys take their defaults. Booleans accept `1`, `true`, `yes`, `y` and
    /// `on` (case-insensitive, surrounding whitespace ignored) as true; any other present
    /// value is false.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = Self::default();
        let generation = GenerationConfig {
            allow_nan: lookup_bool(&lookup, keys::ALLOW_NAN, base.generation.allow_nan),
            allow_inf: lookup_bool(&lookup, keys::ALLOW_INF, base.generation.allow_inf),
            special_rate: lookup_f64(&lookup, keys::SPECIAL_RATE, base.generation.special_rate)?,
            quiet_nan_only: lookup_bool(
                &lookup,
                keys::QUIET_NAN_ONLY,
                base.generation.quiet_nan_only,
            ),
        };
        generation.validate()?;

        Ok(Self {
            generation,
            trials: lookup_int(&lookup, keys::TRIALS, base.trials)?,
            max_tries: lookup_int(&lookup, keys::MAX_TRIES, base.max_tries)?,
            timeout_cycles: lookup_int(&lookup, keys::TIMEOUT_CYCLES, base.timeout_cycles)?,
            clock_period_ns: base.clock_period_ns,
            seed: match lookup(keys::SEED) {
                Some(raw) => Some(parse_int(keys::SEED, &raw)?),
                None => None,
            },
        })
    }

    /// Parses and validates a JSON configuration; absent fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.generation.validate()?;
        Ok(config)
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            trials: defaults::TRIALS,
            max_tries: defaults::MAX_TRIES,
            timeout_cycles: defaults::TIMEOUT_CYCLES,
            clock_period_ns: defaults::CLOCK_PERIOD_NS,
            seed: None,
        }
    }
}

/// Interprets a boolean option value.
pub fn parse_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

fn lookup_bool<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map_or(default, |raw| parse_bool(&raw))
}

fn lookup_f64<F>(lookup: &F, key: &'static str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::InvalidFloat { key, value: raw }),
        None => Ok(default),
    }
}

fn lookup_int<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => parse_int(key, &raw),
        None => Ok(default),
    }
}

fn parse_int<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidInteger {
            key,
            value: raw.to_string(),
        })
}

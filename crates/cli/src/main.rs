//! Binary32 multiplier conformance checker CLI.
//!
//! This binary provides two entry points:
//! 1. **run:** A randomized session against the behavioral multiplier model, configured
//!    from the environment (`ALLOW_NAN`, `ALLOW_INF`, `SPECIAL_RATE`, `QUIET_NAN_ONLY`,
//!    `SEED`, ...) or a JSON file, with command-line overrides.
//! 2. **mul:** Prints the reference product of two bit patterns.
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::fs;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use fmulcheck_core::dut::BehavioralMultiplier;
use fmulcheck_core::reference::multiply;
use fmulcheck_core::{F32Bits, HarnessConfig, Session, VerifyError};

#[derive(Parser, Debug)]
#[command(
    name = "fmulcheck",
    author,
    version,
    about = "Randomized conformance checker for binary32 multipliers",
    long_about = "Drive a clocked binary32 multiplier with random operands and compare every result against a correctly rounded reference.\n\nExamples:\n  fmulcheck run --seed 42\n  ALLOW_NAN=1 ALLOW_INF=1 SPECIAL_RATE=0.1 fmulcheck run --latency 4\n  fmulcheck mul 0x7f7fffff 0x7f7fffff"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a randomized session against the behavioral multiplier.
    Run {
        /// JSON configuration file (replaces environment configuration).
        #[arg(long)]
        config: Option<String>,

        /// RNG seed, for replaying a failing session.
        #[arg(long)]
        seed: Option<u64>,

        /// Number of trials.
        #[arg(long)]
        trials: Option<usize>,

        /// Operand draws per trial before giving up.
        #[arg(long)]
        max_tries: Option<u32>,

        /// Rising edges to wait for out_valid.
        #[arg(long)]
        timeout: Option<u32>,

        /// Latency of the behavioral multiplier, in cycles.
        #[arg(long, default_value_t = 1)]
        latency: u32,

        /// Keep subnormal results instead of flushing them to zero.
        #[arg(long)]
        gradual_underflow: bool,

        /// Print session statistics on success.
        #[arg(long)]
        stats: bool,
    },

    /// Print the reference product of two binary32 bit patterns (hex).
    Mul {
        /// Operand A, e.g. 0x3f800000.
        a: String,
        /// Operand B, e.g. 0x40000000.
        b: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run {
            config,
            seed,
            trials,
            max_tries,
            timeout,
            latency,
            gradual_underflow,
            stats,
        } => cmd_run(
            config.as_deref(),
            Overrides {
                seed,
                trials,
                max_tries,
                timeout,
            },
            latency,
            gradual_underflow,
            stats,
        ),
        Commands::Mul { a, b } => cmd_mul(&a, &b),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            error!("{msg}");
            ExitCode::FAILURE
        }
    }
}

/// Command-line values that take precedence over the loaded configuration.
#[derive(Debug, Default)]
struct Overrides {
    seed: Option<u64>,
    trials: Option<usize>,
    max_tries: Option<u32>,
    timeout: Option<u32>,
}

impl Overrides {
    fn apply(self, config: &mut HarnessConfig) {
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(trials) = self.trials {
            config.trials = trials;
        }
        if let Some(max_tries) = self.max_tries {
            config.max_tries = max_tries;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_cycles = timeout;
        }
    }
}

fn cmd_run(
    config_path: Option<&str>,
    overrides: Overrides,
    latency: u32,
    gradual_underflow: bool,
    print_stats: bool,
) -> Result<(), String> {
    let mut config = match config_path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
            HarnessConfig::from_json(&text).map_err(|e| format!("{path}: {e}"))?
        }
        None => HarnessConfig::from_env().map_err(|e| e.to_string())?,
    };
    overrides.apply(&mut config);

    let mut dut = BehavioralMultiplier::new(latency);
    if gradual_underflow {
        dut = dut.with_gradual_underflow();
    }

    let mut session = Session::new(dut, config).map_err(|e| e.to_string())?;
    let seed = session.seed();
    match session.run() {
        Ok(report) => {
            println!("PASS: {} trials (seed {})", report.trials, report.seed);
            if print_stats {
                report.stats.print();
            }
            Ok(())
        }
        Err(err) => Err(describe_failure(&err, seed)),
    }
}

fn describe_failure(err: &VerifyError, seed: u64) -> String {
    format!("FAIL (replay with --seed {seed}): {err}")
}

fn cmd_mul(a: &str, b: &str) -> Result<(), String> {
    let a = parse_bits(a)?;
    let b = parse_bits(b)?;
    let z = multiply(a, b);
    println!(
        "{a} ({}) * {b} ({}) = {z} ({})",
        a.classify(),
        b.classify(),
        z.classify()
    );
    Ok(())
}

fn parse_bits(raw: &str) -> Result<F32Bits, String> {
    let digits = raw
        .trim()
        .trim_start_matches("0x")
        .trim_start_matches("0X")
        .replace('_', "");
    u32::from_str_radix(&digits, 16)
        .map(F32Bits)
        .map_err(|e| format!("{raw}: {e}"))
}

//! Transaction orchestration.
//!
//! A session runs a fixed number of randomized trials against one DUT:
//! 1. **Draw:** Generate operand pairs until the reference result is not subnormal, up to
//!    `max_tries` draws.
//! 2. **Drive:** Submit the pair through the handshake driver and capture `z`.
//! 3. **Judge:** Apply the equivalence policy.
//!
//! The first timeout, exhausted draw budget, or mismatch aborts the whole session.
//! Randomness comes from a seeded `StdRng`; the seed is logged so a failing session
//! can be replayed exactly.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, error, info};

use crate::check::{Transaction, Verdict};
use crate::common::bits::F32Bits;
use crate::common::error::VerifyError;
use crate::config::HarnessConfig;
use crate::dut::Dut;
use crate::reference::multiply;
use crate::sim::{Bench, Clock, HandshakeDriver, HandshakeState};
use crate::stats::SessionStats;
use crate::stimulus::OperandGenerator;

/// Summary of a session that ran to completion.
#[derive(Clone, Debug)]
pub struct SessionReport {
    /// Seed the session ran with.
    pub seed: u64,
    /// Trials completed.
    pub trials: usize,
    /// Collected statistics.
    pub stats: SessionStats,
}

/// A randomized verification session.
#[derive(Debug)]
pub struct Session<D: Dut> {
    config: HarnessConfig,
    seed: u64,
    rng: StdRng,
    generator: OperandGenerator,
    driver: HandshakeDriver<D>,
    stats: SessionStats,
    trials_run: usize,
    last_transaction: Option<Transaction>,
}

impl<D: Dut> Session<D> {
    /// Creates a session around a DUT.
    ///
    /// # Errors
    ///
    /// [`VerifyError::Config`] if the generation settings are invalid.
    pub fn new(dut: D, config: HarnessConfig) -> Result<Self, VerifyError> {
        config.generation.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        let bench = Bench::new(dut, Clock::new(config.clock_period_ns));
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            generator: OperandGenerator::new(&config.generation),
            driver: HandshakeDriver::new(bench, config.timeout_cycles),
            stats: SessionStats::default(),
            trials_run: 0,
            last_transaction: None,
            seed,
            config,
        })
    }

    /// Seed in use.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Configuration in use.
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Statistics so far.
    pub const fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// The handshake driver.
    pub const fn driver(&self) -> &HandshakeDriver<D> {
        &self.driver
    }

    /// The most recently driven transaction, including one that timed out.
    pub const fn last_transaction(&self) -> Option<&Transaction> {
        self.last_transaction.as_ref()
    }

    /// Runs every configured trial, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// The first [`VerifyError`] raised by generation, the handshake, or the comparator.
    pub fn run(&mut self) -> Result<SessionReport, VerifyError> {
        info!(
            dut = self.driver.bench().dut().name(),
            seed = self.seed,
            trials = self.config.trials,
            allow_nan = self.config.generation.allow_nan,
            allow_inf = self.config.generation.allow_inf,
            special_rate = self.config.generation.special_rate,
            quiet_nan_only = self.config.generation.quiet_nan_only,
            "starting session"
        );

        self.driver.reset();
        for trial in 0..self.config.trials {
            let (a, b, expected) = self.draw_operands(trial)?;
            let _ = self.execute(trial, a, b, expected)?;
        }
        self.sync_cycles();

        let report = self.report();
        info!(
            seed = report.seed,
            trials = report.trials,
            cycles = report.stats.cycles,
            rejected_subnormal = report.stats.rejected_subnormal,
            "session passed"
        );
        Ok(report)
    }

    /// Draws operand pairs until the expected result is not subnormal.
    ///
    /// # Returns
    ///
    /// `(a, b, expected)` for the accepted pair.
    ///
    /// # Errors
    ///
    /// [`VerifyError::GenerationExhausted`] after `max_tries` rejected draws.
    pub fn draw_operands(
        &mut self,
        trial: usize,
    ) -> Result<(F32Bits, F32Bits, F32Bits), VerifyError> {
        for attempt in 1..=self.config.max_tries {
            let a = self.generator.generate(&mut self.rng);
            let b = self.generator.generate(&mut self.rng);
            let expected = multiply(a, b);
            self.stats.draws += 1;

            if expected.is_subnormal() {
                self.stats.rejected_subnormal += 1;
                debug!(trial, attempt, %a, %b, %expected, "subnormal expected result, redrawing");
                continue;
            }
            return Ok((a, b, expected));
        }

        let err = VerifyError::GenerationExhausted {
            trial,
            tries: self.config.max_tries,
        };
        error!("{err}");
        Err(err)
    }

    /// Drives one directed operand pair through the DUT and judges it.
    ///
    /// Resets the DUT first if no reset has happened yet. Pairs whose reference result is
    /// subnormal are driven but not compared.
    ///
    /// # Errors
    ///
    /// [`VerifyError::Timeout`] or [`VerifyError::Mismatch`].
    pub fn check_pair(
        &mut self,
        trial: usize,
        a: F32Bits,
        b: F32Bits,
    ) -> Result<Transaction, VerifyError> {
        if self.driver.state() == HandshakeState::Reset {
            self.driver.reset();
        }
        let txn = self.execute(trial, a, b, multiply(a, b));
        self.sync_cycles();
        txn
    }

    fn execute(
        &mut self,
        trial: usize,
        a: F32Bits,
        b: F32Bits,
        expected: F32Bits,
    ) -> Result<Transaction, VerifyError> {
        let outcome = self.driver.transact(trial, a, b);
        let txn = Transaction {
            trial,
            operand_a: a,
            operand_b: b,
            expected,
            observed: outcome.as_ref().ok().copied(),
        };
        self.last_transaction = Some(txn);

        let observed = match outcome {
            Ok(z) => z,
            Err(err) => {
                if let Verdict::Fail(mismatch) = txn.judge() {
                    error!("{mismatch}");
                }
                error!("{err}");
                return Err(err);
            }
        };
        self.trials_run += 1;

        info!(
            trial,
            %a,
            %b,
            exp = %expected,
            got = %observed,
            exp_nan = expected.is_nan(),
            got_nan = observed.is_nan(),
            exp_sub = expected.is_subnormal(),
            "transaction"
        );

        if expected.is_subnormal() {
            debug!(trial, "subnormal expected result is not compared");
            return Ok(txn);
        }

        match txn.judge() {
            Verdict::Pass => {
                self.stats.trials_passed += 1;
                self.stats.record_expected(expected.classify());
                if expected.is_nan() && expected != observed {
                    self.stats.nan_payload_differences += 1;
                }
                Ok(txn)
            }
            Verdict::Fail(mismatch) => {
                error!("{mismatch}");
                Err(mismatch.into())
            }
        }
    }

    fn sync_cycles(&mut self) {
        self.stats.cycles = self.driver.bench().clock().edges();
    }

    /// Snapshot of the session so far.
    pub fn report(&self) -> SessionReport {
        SessionReport {
            seed: self.seed,
            trials: self.trials_run,
            stats: self.stats.clone(),
        }
    }
}

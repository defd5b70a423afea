//! Session statistics collection and reporting.
//!
//! This module tracks what a session actually exercised. It provides:
//! 1. **Trials:** Completed trials and the cycles they consumed.
//! 2. **Generation:** Operand draws and the pairs rejected for subnormal results.
//! 3. **Coverage:** Expected-result classes and NaN-insensitive passes.

use std::time::Instant;

use crate::common::bits::FpClass;

/// Counters for one verification session.
#[derive(Clone, Debug)]
pub struct SessionStats {
    start_time: Instant,
    /// Trials whose result matched the reference.
    pub trials_passed: u64,
    /// Operand pairs drawn, including rejected ones.
    pub draws: u64,
    /// Pairs rejected because the expected result was subnormal.
    pub rejected_subnormal: u64,
    /// Rising edges issued, reset included.
    pub cycles: u64,

    /// Expected results that were zero.
    pub expected_zero: u64,
    /// Expected results that were normal.
    pub expected_normal: u64,
    /// Expected results that were infinite.
    pub expected_inf: u64,
    /// Expected results that were NaN.
    pub expected_nan: u64,
    /// Passes where the DUT NaN differed bitwise from the reference NaN.
    pub nan_payload_differences: u64,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            trials_passed: 0,
            draws: 0,
            rejected_subnormal: 0,
            cycles: 0,
            expected_zero: 0,
            expected_normal: 0,
            expected_inf: 0,
            expected_nan: 0,
            nan_payload_differences: 0,
        }
    }
}

impl SessionStats {
    /// Records a judged transaction.
    pub fn record_expected(&mut self, class: FpClass) {
        match class {
            FpClass::Zero => self.expected_zero += 1,
            FpClass::Normal => self.expected_normal += 1,
            FpClass::Infinity => self.expected_inf += 1,
            FpClass::QuietNaN | FpClass::SignalingNaN => self.expected_nan += 1,
            FpClass::Subnormal => {}
        }
    }

    /// Average rising edges per trial, or 0 before the first trial.
    pub fn cycles_per_trial(&self) -> f64 {
        if self.trials_passed == 0 {
            0.0
        } else {
            self.cycles as f64 / self.trials_passed as f64
        }
    }

    /// Fraction of draws rejected for subnormal results.
    pub fn rejection_rate(&self) -> f64 {
        if self.draws == 0 {
            0.0
        } else {
            self.rejected_subnormal as f64 / self.draws as f64
        }
    }

    /// Prints the statistics to stdout.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        println!("==========================================================");
        println!("FMUL CONFORMANCE SUMMARY");
        println!("==========================================================");
        println!("trials_passed            {}", self.trials_passed);
        println!("cycles                   {}", self.cycles);
        println!("cycles_per_trial         {:.2}", self.cycles_per_trial());
        println!("host_seconds             {seconds:.4}");
        println!("----------------------------------------------------------");
        println!("draws                    {}", self.draws);
        println!(
            "rejected_subnormal       {} ({:.2}%)",
            self.rejected_subnormal,
            self.rejection_rate() * 100.0
        );
        println!("----------------------------------------------------------");
        println!("expected.zero            {}", self.expected_zero);
        println!("expected.normal          {}", self.expected_normal);
        println!("expected.inf             {}", self.expected_inf);
        println!("expected.nan             {}", self.expected_nan);
        println!("nan_payload_differences  {}", self.nan_payload_differences);
        println!("==========================================================");
    }
}

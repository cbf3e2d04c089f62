//! Elimination statistics.

use std::time::{Duration, Instant};

use serde::Serialize;

/// Run-level statistics.
///
/// # Example
///
/// ```
/// use formforge_solver::stats::SolverStats;
///
/// let mut stats = SolverStats::default();
/// stats.start();
/// stats.record_step();
/// stats.record_candidate(true);
/// stats.record_candidate(false);
///
/// assert_eq!(stats.step_count, 1);
/// assert_eq!(stats.candidates_evaluated, 2);
/// assert_eq!(stats.candidates_rejected, 1);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct SolverStats {
    #[serde(skip)]
    start_time: Option<Instant>,
    /// Removals committed.
    pub step_count: u64,
    /// Removal candidates put through the constraint check.
    pub candidates_evaluated: u64,
    /// Candidates the constraint check rejected.
    pub candidates_rejected: u64,
    /// Reliability computations performed.
    pub reliability_evaluations: u64,
    /// Wall time of the run, set by [`finish`](Self::finish).
    pub elapsed_ms: u64,
}

impl SolverStats {
    /// Marks the start of solving.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Returns the elapsed time since solving started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    /// Freezes the elapsed time.
    pub fn finish(&mut self) {
        self.elapsed_ms = self.elapsed().as_millis() as u64;
    }

    /// Records a constraint check and whether the candidate was legal.
    pub fn record_candidate(&mut self, legal: bool) {
        self.candidates_evaluated += 1;
        if !legal {
            self.candidates_rejected += 1;
        }
    }

    /// Records a step completion.
    pub fn record_step(&mut self) {
        self.step_count += 1;
    }

    /// Returns reliability evaluations per second.
    pub fn evaluations_per_second(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.reliability_evaluations as f64 / secs
        } else {
            0.0
        }
    }

    /// Returns the share of checked candidates that were rejected.
    pub fn rejection_rate(&self) -> f64 {
        if self.candidates_evaluated == 0 {
            0.0
        } else {
            self.candidates_rejected as f64 / self.candidates_evaluated as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_without_activity() {
        let stats = SolverStats::default();
        assert_eq!(stats.rejection_rate(), 0.0);
        assert_eq!(stats.evaluations_per_second(), 0.0);
        assert_eq!(stats.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_evaluation_rate_after_start() {
        let mut stats = SolverStats::default();
        stats.start();
        stats.reliability_evaluations = 10;
        std::thread::sleep(Duration::from_millis(5));
        stats.finish();

        let rate = stats.evaluations_per_second();
        assert!(rate > 0.0 && rate <= 2_000.0, "rate {rate}");
    }

    #[test]
    fn test_rejection_rate() {
        let mut stats = SolverStats::default();
        stats.record_candidate(true);
        stats.record_candidate(false);
        stats.record_candidate(false);
        stats.record_candidate(true);
        assert_eq!(stats.rejection_rate(), 0.5);
    }
}

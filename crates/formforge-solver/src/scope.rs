//! Run-level scope shared between the solver and its strategy.

use formforge_core::{FormProblem, Result};
use formforge_scoring::ReliabilityEstimator;
use tracing::debug;

use crate::active::{ActiveItemSet, RemovalLog};
use crate::checker::{ConstraintChecker, DomainViolation};
use crate::event::RemovalStep;
use crate::stats::SolverStats;
use crate::strategy::Selection;

/// Mutable state of one elimination run.
///
/// Owns the active item set and the removal log; everything else is
/// borrowed read-only for the duration of the run.
pub struct EliminationScope<'a> {
    problem: &'a FormProblem,
    estimator: &'a dyn ReliabilityEstimator,
    checker: &'a dyn ConstraintChecker,
    active: ActiveItemSet,
    log: RemovalLog,
    target: usize,
    stats: SolverStats,
}

impl<'a> EliminationScope<'a> {
    /// Starts a run over every item of `problem`.
    pub fn new(
        problem: &'a FormProblem,
        estimator: &'a dyn ReliabilityEstimator,
        checker: &'a dyn ConstraintChecker,
        target: usize,
    ) -> Self {
        Self {
            problem,
            estimator,
            checker,
            active: ActiveItemSet::new(problem.all_items()),
            log: RemovalLog::new(),
            target,
            stats: SolverStats::default(),
        }
    }

    pub fn problem(&self) -> &'a FormProblem {
        self.problem
    }

    pub fn active(&self) -> &ActiveItemSet {
        &self.active
    }

    pub fn log(&self) -> &RemovalLog {
        &self.log
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// Removals still needed to reach the target length.
    pub fn remaining_removals(&self) -> usize {
        self.active.len().saturating_sub(self.target)
    }

    pub fn is_done(&self) -> bool {
        self.active.len() <= self.target
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut SolverStats {
        &mut self.stats
    }

    /// Reliability of the form made of `items`.
    pub fn evaluate(&self, items: &[usize]) -> Result<f64> {
        Ok(self.estimator.reliability(self.problem.grid(), items)?)
    }

    /// Runs the constraint check for removing `item` from the current set.
    pub fn is_removable(&mut self, item: usize) -> bool {
        let legal = self
            .checker
            .is_removable(self.problem, item, &self.active, self.target);
        self.stats.record_candidate(legal);
        if !legal {
            debug!(
                event = "candidate_rejected",
                item = self.problem.item_id(item),
                domain = self.problem.domain_name(self.problem.domain_of(item)),
                remaining_removals = self.remaining_removals() as u64,
            );
        }
        legal
    }

    /// Blueprint violations of an arbitrary item set.
    pub fn violations(&self, items: &[usize]) -> Vec<DomainViolation> {
        self.checker.violations(self.problem, items)
    }

    /// Removes the selected item and appends it to the log.
    pub fn commit_removal(&mut self, selection: Selection) -> RemovalStep {
        let item = self.active.remove_at(selection.position);
        self.log.push(item);
        self.stats.record_step();
        RemovalStep {
            step: self.stats.step_count,
            item,
            item_id: self.problem.item_id(item).to_string(),
            remaining: self.active.len(),
            alpha: selection.alpha,
        }
    }

    pub(crate) fn into_parts(self) -> (ActiveItemSet, RemovalLog, SolverStats) {
        (self.active, self.log, self.stats)
    }
}

impl std::fmt::Debug for EliminationScope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EliminationScope")
            .field("active", &self.active.len())
            .field("removed", &self.log.len())
            .field("target", &self.target)
            .finish()
    }
}

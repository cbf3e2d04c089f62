//! The elimination driver.

use std::sync::Arc;

use formforge_config::{FormConfig, ReferenceItem, StrategyConfig};
use formforge_core::{FormForgeError, FormProblem, Result};
use formforge_scoring::{CountingEstimator, CronbachAlpha, ReliabilityEstimator};
use serde::Serialize;
use tracing::{info, warn};

use crate::checker::{BlueprintChecker, ConstraintChecker, DomainViolation};
use crate::event::{EliminationEventSupport, EliminationListener, RemovalStep};
use crate::scope::EliminationScope;
use crate::stats::SolverStats;
use crate::strategy::{
    EliminationStrategy, ExhaustiveElimination, GreedyBackwardElimination, ReferencePolicy,
};

/// Outcome of a completed elimination run.
#[derive(Debug, Clone, Serialize)]
pub struct EliminationResult {
    pub strategy: &'static str,
    pub initial_size: usize,
    pub target_length: usize,
    /// Removed item ids, in removal order.
    pub removed: Vec<String>,
    /// Item ids left on the form, in grid order.
    pub remaining: Vec<String>,
    pub final_size: usize,
    /// Reliability of the remaining form.
    pub final_alpha: f64,
    pub steps: Vec<RemovalStep>,
    /// Empty unless the run ended on a form that breaks the blueprint.
    pub blueprint_violations: Vec<DomainViolation>,
    pub stats: SolverStats,
}

impl EliminationResult {
    /// Returns true if the final form satisfies the blueprint.
    pub fn is_feasible(&self) -> bool {
        self.blueprint_violations.is_empty()
    }
}

/// Drives an [`EliminationStrategy`] until the form reaches its target
/// length.
///
/// Runs are sequential and deterministic. Any reliability failure aborts
/// the run and no result is produced.
///
/// # Example
///
/// ```
/// use formforge_core::{Blueprint, DomainMap, FormProblem, ItemScore, ResponseGrid};
/// use formforge_solver::FormSolver;
///
/// let (c, i) = (ItemScore::Correct, ItemScore::Incorrect);
/// let grid = ResponseGrid::from_rows(
///     vec!["i1".into(), "i2".into(), "i3".into()],
///     vec![
///         ("c1".into(), vec![c, c, i]),
///         ("c2".into(), vec![c, i, c]),
///         ("c3".into(), vec![i, c, c]),
///         ("c4".into(), vec![i, i, c]),
///     ],
/// ).unwrap();
/// let domains = DomainMap::new().with_item("i1", "D").with_item("i2", "D").with_item("i3", "D");
/// let blueprint = Blueprint::new().with_domain("D", 1, 3);
/// let problem = FormProblem::new(grid, &domains, &blueprint).unwrap();
///
/// let result = FormSolver::new(2).solve(&problem).unwrap();
/// assert_eq!(result.removed, vec!["i3".to_string()]);
/// assert!((result.final_alpha - 0.5).abs() < 1e-9);
/// ```
pub struct FormSolver<E = CronbachAlpha> {
    estimator: CountingEstimator<E>,
    checker: Box<dyn ConstraintChecker>,
    strategy: Box<dyn EliminationStrategy>,
    target_length: usize,
    events: EliminationEventSupport,
}

impl FormSolver<CronbachAlpha> {
    /// Greedy elimination with Cronbach's alpha and the blueprint checker.
    pub fn new(target_length: usize) -> Self {
        Self {
            estimator: CountingEstimator::new(CronbachAlpha),
            checker: Box::new(BlueprintChecker),
            strategy: Box::new(GreedyBackwardElimination::new()),
            target_length,
            events: EliminationEventSupport::new(),
        }
    }

    /// Builds a solver from a validated configuration.
    pub fn from_config(config: &FormConfig) -> Result<Self> {
        let target_length = config
            .target_length()
            .map_err(|e| FormForgeError::Config(e.to_string()))?;
        Ok(Self::new(target_length).with_boxed_strategy(strategy_from_config(&config.strategy)))
    }
}

impl<E: ReliabilityEstimator> FormSolver<E> {
    /// Replaces the reliability estimator.
    pub fn with_estimator<F: ReliabilityEstimator>(self, estimator: F) -> FormSolver<F> {
        FormSolver {
            estimator: CountingEstimator::new(estimator),
            checker: self.checker,
            strategy: self.strategy,
            target_length: self.target_length,
            events: self.events,
        }
    }

    pub fn with_strategy(self, strategy: impl EliminationStrategy + 'static) -> Self {
        self.with_boxed_strategy(Box::new(strategy))
    }

    pub fn with_boxed_strategy(mut self, strategy: Box<dyn EliminationStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_checker(mut self, checker: impl ConstraintChecker + 'static) -> Self {
        self.checker = Box::new(checker);
        self
    }

    pub fn with_listener(mut self, listener: Arc<dyn EliminationListener>) -> Self {
        self.events.add_listener(listener);
        self
    }

    pub fn add_listener(&mut self, listener: Arc<dyn EliminationListener>) {
        self.events.add_listener(listener);
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.strategy_name()
    }

    /// Removes items from `problem` until `target_length` remain.
    ///
    /// Runs exactly `item_count − target_length` steps (none when the form
    /// is already short enough), then reports the reliability of the
    /// remaining form.
    pub fn solve(&mut self, problem: &FormProblem) -> Result<EliminationResult> {
        let initial_size = problem.item_count();
        let target = self.target_length;
        let strategy_name = self.strategy.strategy_name();

        self.estimator.reset();
        self.strategy.reset();

        info!(
            event = "solve_start",
            item_count = initial_size as u64,
            candidate_count = problem.candidate_count() as u64,
            domain_count = problem.domain_count() as u64,
            target_length = target as u64,
            strategy = strategy_name,
        );
        self.events.fire_solving_started(initial_size, target);

        let mut scope = EliminationScope::new(problem, &self.estimator, self.checker.as_ref(), target);
        scope.stats_mut().start();

        let mut steps = Vec::with_capacity(initial_size.saturating_sub(target));
        while !scope.is_done() {
            let selection = self.strategy.select_removal(&mut scope)?;
            let step = scope.commit_removal(selection);
            info!(
                event = "item_removed",
                step = step.step,
                item = %step.item_id,
                remaining = step.remaining as u64,
                alpha = step.alpha,
            );
            self.events.fire_item_removed(&step);
            steps.push(step);
        }

        let final_alpha = scope.evaluate(scope.active())?;
        let violations = scope.violations(scope.active());
        for violation in &violations {
            warn!(
                event = "blueprint_violation",
                domain = %violation.domain,
                count = violation.count as u64,
                min = violation.min as u64,
                max = violation.max as u64,
            );
        }

        let (active, log, mut stats) = scope.into_parts();
        stats.reliability_evaluations = self.estimator.evaluations();
        stats.finish();

        let result = EliminationResult {
            strategy: strategy_name,
            initial_size,
            target_length: target,
            removed: log.items().iter().map(|&i| problem.item_id(i).to_string()).collect(),
            remaining: active.iter().map(|&i| problem.item_id(i).to_string()).collect(),
            final_size: active.len(),
            final_alpha,
            steps,
            blueprint_violations: violations,
            stats,
        };

        info!(
            event = "solve_end",
            removed = result.removed.len() as u64,
            final_size = result.final_size as u64,
            alpha = result.final_alpha,
            feasible = result.is_feasible(),
            duration_ms = result.stats.elapsed_ms,
            evaluations = result.stats.reliability_evaluations,
            speed = result.stats.evaluations_per_second() as u64,
        );
        self.events.fire_solving_ended(&result);

        Ok(result)
    }
}

impl<E: std::fmt::Debug> std::fmt::Debug for FormSolver<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSolver")
            .field("estimator", &self.estimator)
            .field("checker", &self.checker)
            .field("strategy", &self.strategy)
            .field("target_length", &self.target_length)
            .field("events", &self.events)
            .finish()
    }
}

/// Creates the strategy described by `config`.
pub fn strategy_from_config(config: &StrategyConfig) -> Box<dyn EliminationStrategy> {
    match config {
        StrategyConfig::GreedyBackward(greedy) => {
            let policy = match greedy.reference {
                ReferenceItem::FirstItem => ReferencePolicy::FirstItem,
                ReferenceItem::Checked => ReferencePolicy::Checked,
            };
            Box::new(GreedyBackwardElimination::with_policy(policy))
        }
        StrategyConfig::Exhaustive(exhaustive) => {
            Box::new(ExhaustiveElimination::with_max_subsets(exhaustive.max_subsets))
        }
    }
}

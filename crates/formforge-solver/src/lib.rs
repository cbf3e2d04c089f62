//! Item elimination engine for FormForge
//!
//! This crate shortens a beta-tested form to its target length:
//! - Blueprint legality checks for individual removals
//! - Search strategies (greedy backward elimination, exhaustive search)
//! - The `FormSolver` driver with statistics and event listeners
//!
//! # Example
//!
//! ```
//! use formforge_solver::{FormSolver, GreedyBackwardElimination, ReferencePolicy};
//!
//! let solver = FormSolver::new(75)
//!     .with_strategy(GreedyBackwardElimination::with_policy(ReferencePolicy::Checked));
//! assert_eq!(solver.target_length(), 75);
//! assert_eq!(solver.strategy_name(), "GreedyBackwardElimination");
//! ```

pub mod active;
pub mod checker;
pub mod event;
pub mod scope;
pub mod solver;
pub mod stats;
pub mod strategy;

#[cfg(test)]
mod checker_tests;
#[cfg(test)]
mod event_tests;

pub use active::{ActiveItemSet, RemovalLog};
pub use checker::{BlueprintChecker, ConstraintChecker, DomainViolation};
pub use event::{
    CollectingEventListener, CountingEventListener, EliminationEventSupport, EliminationListener,
    RemovalStep,
};
pub use scope::EliminationScope;
pub use solver::{strategy_from_config, EliminationResult, FormSolver};
pub use stats::SolverStats;
pub use strategy::{
    EliminationStrategy, ExhaustiveElimination, GreedyBackwardElimination, ReferencePolicy,
    Selection, DEFAULT_MAX_SUBSETS,
};

//! FormForge - reliability-driven exam form reduction
//!
//! Shortens a beta-tested form to a target length by dropping, one at a
//! time, the item whose removal leaves the highest Cronbach's alpha, while
//! keeping every content domain within its blueprint bounds.
//!
//! # Example
//!
//! ```rust
//! use formforge::prelude::*;
//!
//! let blueprint = Blueprint::new().with_domain("Law", 10, 20);
//! assert_eq!(blueprint.get("Law"), Some(DomainBounds::new(10, 20)));
//!
//! let solver = FormSolver::new(75);
//! assert_eq!(solver.strategy_name(), "GreedyBackwardElimination");
//! ```

// Data model and errors
pub use formforge_core::{
    Blueprint, DomainBounds, DomainMap, FormForgeError, FormProblem, ItemScore, ItemTally,
    KeyMap, ReliabilityError, ResponseGrid, ResponseGridBuilder, Result,
};

// Reliability
pub use formforge_scoring::{CountingEstimator, CronbachAlpha, ReliabilityEstimator};

// Elimination engine
pub use formforge_solver::{
    BlueprintChecker, ConstraintChecker, DomainViolation, EliminationListener, EliminationResult,
    EliminationStrategy, ExhaustiveElimination, FormSolver, GreedyBackwardElimination,
    ReferencePolicy, RemovalStep, SolverStats,
};

// Configuration and loading
pub use formforge_config::{FormConfig, InputConfig, StrategyConfig};
pub use formforge_io::{load_blueprint, load_domains, load_keys, load_problem, load_responses};

#[cfg(feature = "console")]
pub use formforge_console as console;

mod runner;
pub use runner::{form_reliability, run, run_with_listener};

pub mod prelude {
    pub use super::{Blueprint, DomainBounds, DomainMap, FormProblem, ItemScore, ResponseGrid};
    pub use super::{CronbachAlpha, ReliabilityEstimator};
    pub use super::{
        EliminationResult, ExhaustiveElimination, FormSolver, GreedyBackwardElimination,
        ReferencePolicy,
    };
    pub use super::{FormConfig, FormForgeError, Result};
}

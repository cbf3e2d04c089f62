//! Search strategies for choosing the next removal.
//!
//! A strategy is asked for one removal at a time until the form reaches
//! its target length:
//! - `GreedyBackwardElimination`: best single removal each step
//! - `ExhaustiveElimination`: best legal target-sized subset, small forms only

mod exhaustive;
mod greedy;


use std::fmt::Debug;

use formforge_core::Result;

use crate::scope::EliminationScope;

pub use exhaustive::{ExhaustiveElimination, DEFAULT_MAX_SUBSETS};
pub use greedy::{GreedyBackwardElimination, ReferencePolicy};

/// The removal a strategy picked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    /// Position of the item within the active set.
    pub position: usize,
    /// Reliability of the active set without that item.
    pub alpha: f64,
}

/// Chooses which item to drop next.
///
/// Strategies must not modify the active set themselves; the solver
/// commits the returned selection.
pub trait EliminationStrategy: Send + Debug {
    /// Picks one removal from the current active set.
    ///
    /// Only called while the set is longer than the target.
    fn select_removal(&mut self, scope: &mut EliminationScope<'_>) -> Result<Selection>;

    /// Clears any state carried over from a previous run.
    fn reset(&mut self) {}

    /// Returns the name of this strategy.
    fn strategy_name(&self) -> &'static str;
}

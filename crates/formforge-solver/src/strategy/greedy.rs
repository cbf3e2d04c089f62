//! Greedy backward elimination.

use formforge_core::{FormForgeError, Result};
use tracing::trace;

use super::{EliminationStrategy, Selection};
use crate::scope::EliminationScope;

/// How the first item of each scan is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReferencePolicy {
    /// The first item is the baseline and is never constraint-checked.
    ///
    /// It is removed unless a checked item strictly beats its alpha, even
    /// when its removal breaks the blueprint.
    #[default]
    FirstItem,

    /// Every item, the first included, must pass the constraint check.
    ///
    /// A step with no legal item fails with [`FormForgeError::Infeasible`].
    Checked,
}

/// Removes, one step at a time, the item whose removal gives the highest
/// alpha among the legal candidates. Earlier removals are never revisited.
///
/// Ties keep the earlier item: a candidate replaces the running best only
/// when its alpha is strictly greater.
///
/// # Example
///
/// ```
/// use formforge_solver::strategy::{GreedyBackwardElimination, ReferencePolicy};
///
/// let greedy = GreedyBackwardElimination::new();
/// assert_eq!(greedy.policy(), ReferencePolicy::FirstItem);
///
/// let checked = GreedyBackwardElimination::with_policy(ReferencePolicy::Checked);
/// assert_eq!(checked.policy(), ReferencePolicy::Checked);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyBackwardElimination {
    policy: ReferencePolicy,
}

impl GreedyBackwardElimination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: ReferencePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ReferencePolicy {
        self.policy
    }

    // Alpha of the active set without the item at `position`.
    fn trial(scope: &EliminationScope<'_>, position: usize) -> Result<f64> {
        let trial = scope.active().without(position);
        let alpha = scope.evaluate(&trial)?;
        trace!(
            event = "candidate",
            item = scope.problem().item_id(scope.active()[position]),
            alpha = alpha,
        );
        Ok(alpha)
    }
}

impl EliminationStrategy for GreedyBackwardElimination {
    fn select_removal(&mut self, scope: &mut EliminationScope<'_>) -> Result<Selection> {
        let len = scope.active().len();

        let (mut best, first_checked) = match self.policy {
            ReferencePolicy::FirstItem => {
                let alpha = Self::trial(scope, 0)?;
                (Some(Selection { position: 0, alpha }), 1)
            }
            ReferencePolicy::Checked => (None, 0),
        };

        for position in first_checked..len {
            let item = scope.active()[position];
            if !scope.is_removable(item) {
                continue;
            }
            let alpha = Self::trial(scope, position)?;
            if best.map_or(true, |b| alpha > b.alpha) {
                best = Some(Selection { position, alpha });
            }
        }

        best.ok_or_else(|| {
            FormForgeError::Infeasible(format!(
                "none of the {len} remaining items can be removed without breaking the blueprint"
            ))
        })
    }

    fn strategy_name(&self) -> &'static str {
        "GreedyBackwardElimination"
    }
}

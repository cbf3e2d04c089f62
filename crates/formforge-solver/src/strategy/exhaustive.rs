//! Exhaustive subset search for small forms.

use std::collections::VecDeque;

use formforge_core::{FormForgeError, Result};
use tracing::{debug, info};

use super::{EliminationStrategy, Selection};
use crate::scope::EliminationScope;

/// Default cap on the number of subsets examined.
pub const DEFAULT_MAX_SUBSETS: u64 = 100_000;

/// Examines every target-sized subset of the current form.
///
/// On the first call the strategy enumerates the subsets in lexicographic
/// order, keeps the blueprint-legal one with the strictly greatest alpha,
/// and then hands out the removals needed to reach it in form order.
/// Forms whose subset count exceeds `max_subsets` are refused.
#[derive(Debug, Clone)]
pub struct ExhaustiveElimination {
    max_subsets: u64,
    plan: Option<VecDeque<usize>>,
}

impl ExhaustiveElimination {
    pub fn new() -> Self {
        Self::with_max_subsets(DEFAULT_MAX_SUBSETS)
    }

    pub fn with_max_subsets(max_subsets: u64) -> Self {
        Self {
            max_subsets,
            plan: None,
        }
    }

    pub fn max_subsets(&self) -> u64 {
        self.max_subsets
    }

    fn plan_removals(&self, scope: &EliminationScope<'_>) -> Result<VecDeque<usize>> {
        let items = scope.active().items();
        let n = items.len();
        let k = scope.target().min(n);

        let subsets = binomial(n as u64, k as u64);
        if subsets > self.max_subsets as u128 {
            return Err(FormForgeError::SearchSpaceTooLarge {
                subsets,
                limit: self.max_subsets,
            });
        }
        info!(
            event = "exhaustive_start",
            items = n as u64,
            target = k as u64,
            subsets = subsets as u64,
        );

        let mut best: Option<(Vec<usize>, f64)> = None;
        let mut subset = Vec::with_capacity(k);
        for positions in Combinations::new(n, k) {
            subset.clear();
            subset.extend(positions.iter().map(|&p| items[p]));

            if !scope.violations(&subset).is_empty() {
                continue;
            }
            let alpha = scope.evaluate(&subset)?;
            if best.as_ref().map_or(true, |(_, b)| alpha > *b) {
                debug!(event = "exhaustive_improved", alpha = alpha);
                best = Some((subset.clone(), alpha));
            }
        }

        let (kept, _) = best.ok_or_else(|| {
            FormForgeError::Infeasible(format!(
                "no {k}-item subset of the {n} remaining items satisfies the blueprint"
            ))
        })?;
        Ok(items
            .iter()
            .copied()
            .filter(|item| !kept.contains(item))
            .collect())
    }
}

impl Default for ExhaustiveElimination {
    fn default() -> Self {
        Self::new()
    }
}

impl EliminationStrategy for ExhaustiveElimination {
    fn select_removal(&mut self, scope: &mut EliminationScope<'_>) -> Result<Selection> {
        if self.plan.is_none() {
            self.plan = Some(self.plan_removals(scope)?);
        }

        let item = self
            .plan
            .as_mut()
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| FormForgeError::Internal("exhaustive plan exhausted".to_string()))?;
        let position = scope.active().position_of(item).ok_or_else(|| {
            FormForgeError::Internal(format!(
                "planned item {} is no longer on the form",
                scope.problem().item_id(item)
            ))
        })?;

        let alpha = scope.evaluate(&scope.active().without(position))?;
        Ok(Selection { position, alpha })
    }

    fn reset(&mut self) {
        self.plan = None;
    }

    fn strategy_name(&self) -> &'static str {
        "ExhaustiveElimination"
    }
}

/// `n choose k`, saturating at `u128::MAX`.
pub(crate) fn binomial(n: u64, k: u64) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // exact at every step: result * (n - i) is divisible by (i + 1)
        result = match result.checked_mul((n - i) as u128) {
            Some(product) => product / (i + 1) as u128,
            None => return u128::MAX,
        };
    }
    result
}

/// Lexicographic k-combinations of `0..n`.
struct Combinations {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        let current = self.indices.clone();

        let k = self.indices.len();
        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
            if self.indices[i] < self.n - k + i {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
        }
        Some(current)
    }
}

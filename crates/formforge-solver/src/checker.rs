//! Blueprint legality of removals.

use std::fmt::Debug;

use formforge_core::FormProblem;
use serde::Serialize;

/// Decides whether an item may be removed from the current form.
///
/// Checks are pure: the same arguments always give the same answer.
pub trait ConstraintChecker: Send + Sync + Debug {
    /// Returns true if removing `item` from `active` is legal.
    ///
    /// `active` is the current set before the removal and still contains
    /// `item`; `target` is the final form length.
    fn is_removable(&self, problem: &FormProblem, item: usize, active: &[usize], target: usize)
        -> bool;

    /// Domains of a finished form whose item count is out of bounds.
    fn violations(&self, problem: &FormProblem, items: &[usize]) -> Vec<DomainViolation>;
}

/// A domain whose item count lies outside its blueprint range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainViolation {
    pub domain: String,
    pub count: usize,
    pub min: usize,
    pub max: usize,
}

impl std::fmt::Display for DomainViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "domain {} has {} items, blueprint allows {}..={}",
            self.domain, self.count, self.min, self.max
        )
    }
}

/// One-step blueprint lookahead.
///
/// A removal is rejected when
/// 1. the item's own domain would drop below its minimum, or
/// 2. some other domain is over its maximum by more than the number of
///    removals still needed to reach the target.
///
/// Each domain over its maximum is checked on its own; the removals needed
/// by several such domains are not added up.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlueprintChecker;

impl ConstraintChecker for BlueprintChecker {
    fn is_removable(
        &self,
        problem: &FormProblem,
        item: usize,
        active: &[usize],
        target: usize,
    ) -> bool {
        let counts = problem.domain_counts(active);
        let own = problem.domain_of(item);

        if counts[own] <= problem.bounds(own).min {
            return false;
        }

        let remaining = active.len().saturating_sub(target);
        counts
            .iter()
            .enumerate()
            .filter(|&(domain, _)| domain != own)
            .all(|(domain, &count)| problem.bounds(domain).overage(count) <= remaining)
    }

    fn violations(&self, problem: &FormProblem, items: &[usize]) -> Vec<DomainViolation> {
        problem
            .domain_counts(items)
            .into_iter()
            .enumerate()
            .filter_map(|(domain, count)| {
                let bounds = problem.bounds(domain);
                (!bounds.contains(count)).then(|| DomainViolation {
                    domain: problem.domain_name(domain).to_string(),
                    count,
                    min: bounds.min,
                    max: bounds.max,
                })
            })
            .collect()
    }
}

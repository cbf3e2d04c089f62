//! Reliability estimation for FormForge
//!
//! This crate computes internal-consistency reliability for arbitrary
//! subsets of a response grid:
//! - `ReliabilityEstimator`: the trait the elimination engine drives
//! - `CronbachAlpha`: Cronbach's alpha with omissions excluded per item
//! - `CountingEstimator`: decorator counting evaluations for statistics

mod alpha;
mod counting;

#[cfg(test)]
mod tests;

use std::fmt::Debug;

use formforge_core::{ReliabilityError, ResponseGrid};

pub use alpha::{sum_pq, total_score_variance, CronbachAlpha};
pub use counting::CountingEstimator;

/// Computes a reliability coefficient for a subset of grid items.
///
/// Implementations must be pure functions of the grid and the item set:
/// the same inputs always produce the same result, regardless of the
/// order in which items are listed.
pub trait ReliabilityEstimator: Send + Sync + Debug {
    /// Returns the reliability of the form made of `items`.
    ///
    /// `items` are dense grid item indices.
    fn reliability(&self, grid: &ResponseGrid, items: &[usize]) -> Result<f64, ReliabilityError>;

    /// Returns the name of this estimator.
    fn name(&self) -> &'static str;
}

impl<E: ReliabilityEstimator + ?Sized> ReliabilityEstimator for Box<E> {
    fn reliability(&self, grid: &ResponseGrid, items: &[usize]) -> Result<f64, ReliabilityError> {
        (**self).reliability(grid, items)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

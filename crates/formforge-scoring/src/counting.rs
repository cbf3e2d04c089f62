//! Evaluation-counting estimator decorator.

use std::sync::atomic::{AtomicU64, Ordering};

use formforge_core::{ReliabilityError, ResponseGrid};

use crate::ReliabilityEstimator;

/// Wraps an estimator and counts how often it is evaluated.
///
/// Failed evaluations are counted too.
///
/// # Example
///
/// ```
/// use formforge_scoring::{CountingEstimator, CronbachAlpha, ReliabilityEstimator};
/// use formforge_core::ResponseGrid;
///
/// let estimator = CountingEstimator::new(CronbachAlpha);
/// let grid = ResponseGrid::from_rows(vec![], vec![]).unwrap();
/// assert!(estimator.reliability(&grid, &[]).is_err());
/// assert_eq!(estimator.evaluations(), 1);
/// ```
#[derive(Debug, Default)]
pub struct CountingEstimator<E> {
    inner: E,
    evaluations: AtomicU64,
}

impl<E: ReliabilityEstimator> CountingEstimator<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            evaluations: AtomicU64::new(0),
        }
    }

    /// Number of evaluations since creation or the last reset.
    pub fn evaluations(&self) -> u64 {
        self.evaluations.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.evaluations.store(0, Ordering::Relaxed);
    }
}

impl<E: ReliabilityEstimator> ReliabilityEstimator for CountingEstimator<E> {
    fn reliability(&self, grid: &ResponseGrid, items: &[usize]) -> Result<f64, ReliabilityError> {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        self.inner.reliability(grid, items)
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

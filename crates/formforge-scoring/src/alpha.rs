//! Cronbach's alpha.

use formforge_core::{ReliabilityError, ResponseGrid};

use crate::ReliabilityEstimator;

/// Cronbach's alpha for dichotomously scored items.
///
/// `alpha = k/(k-1) · (1 − Σpq / varx)` where `pq` is computed per item
/// over its respondents only and `varx` is the sample variance of the
/// candidate totals. Omitted responses add nothing to a total but the
/// candidate still counts towards the variance.
///
/// # Example
///
/// ```
/// use formforge_core::{ItemScore, ResponseGrid};
/// use formforge_scoring::{CronbachAlpha, ReliabilityEstimator};
///
/// let (c, i) = (ItemScore::Correct, ItemScore::Incorrect);
/// let grid = ResponseGrid::from_rows(
///     vec!["q1".into(), "q2".into()],
///     vec![
///         ("ann".into(), vec![c, c]),
///         ("bob".into(), vec![c, i]),
///         ("cai".into(), vec![i, i]),
///     ],
/// ).unwrap();
///
/// let alpha = CronbachAlpha.reliability(&grid, &[0, 1]).unwrap();
/// assert!((alpha - 10.0 / 9.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CronbachAlpha;

impl ReliabilityEstimator for CronbachAlpha {
    fn reliability(&self, grid: &ResponseGrid, items: &[usize]) -> Result<f64, ReliabilityError> {
        let k = items.len();
        match k {
            0 => return Err(ReliabilityError::EmptyItemSet),
            1 => return Err(ReliabilityError::SingleItem),
            _ => {}
        }
        if grid.candidate_count() < 2 {
            return Err(ReliabilityError::TooFewCandidates {
                count: grid.candidate_count(),
            });
        }

        let covpq = sum_pq(grid, items)?;
        let varx = total_score_variance(grid, items)?;

        let k = k as f64;
        Ok((k / (k - 1.0)) * (1.0 - covpq / varx))
    }

    fn name(&self) -> &'static str {
        "CronbachAlpha"
    }
}

/// Sums the item variance proxies `pq` over `items`.
///
/// Fails when an item has no respondents.
pub fn sum_pq(grid: &ResponseGrid, items: &[usize]) -> Result<f64, ReliabilityError> {
    let mut covpq = 0.0;
    for &item in items {
        let pq = grid
            .item_tally(item)
            .pq()
            .ok_or_else(|| ReliabilityError::NoRespondents {
                item: grid.item_id(item).to_string(),
            })?;
        covpq += pq;
    }
    Ok(covpq)
}

/// Sample variance (divisor `n − 1`) of candidate totals over `items`.
///
/// Totals are integers, so the variance numerator is accumulated exactly;
/// zero variance is detected without rounding noise.
pub fn total_score_variance(grid: &ResponseGrid, items: &[usize]) -> Result<f64, ReliabilityError> {
    let n = grid.candidate_count();
    if n < 2 {
        return Err(ReliabilityError::TooFewCandidates { count: n });
    }

    let mut sum: u128 = 0;
    let mut sum_sq: u128 = 0;
    for candidate in 0..n {
        let total = grid.candidate_total(candidate, items) as u128;
        sum += total;
        sum_sq += total * total;
    }

    // n·Σx² − (Σx)² = n(n−1)·s²
    let n = n as u128;
    let numerator = n * sum_sq - sum * sum;
    if numerator == 0 {
        return Err(ReliabilityError::ZeroVariance);
    }
    Ok(numerator as f64 / (n * (n - 1)) as f64)
}

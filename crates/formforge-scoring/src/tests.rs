//! Tests for reliability estimation.

use formforge_core::ReliabilityError;
use formforge_test::grid::{grid_from_columns, grid_from_optional_columns};
use formforge_test::scenarios::{
    three_item_grid, three_item_grid_with_blank_candidate, BLANK_CANDIDATE_ALPHA,
    THREE_ITEM_ALPHA, THREE_ITEM_BEST_PAIR_ALPHA, THREE_ITEM_WORST_PAIR_ALPHA,
};
use proptest::prelude::*;
use std::mem::discriminant;

use super::*;

const TOLERANCE: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

// ============================================================================
// CronbachAlpha
// ============================================================================

#[test]
fn test_alpha_full_three_item_form() {
    let grid = three_item_grid();
    assert_close(
        CronbachAlpha.reliability(&grid, &[0, 1, 2]).unwrap(),
        THREE_ITEM_ALPHA,
    );
}

#[test]
fn test_alpha_item_pairs() {
    let grid = three_item_grid();
    assert_close(
        CronbachAlpha.reliability(&grid, &[0, 1]).unwrap(),
        THREE_ITEM_BEST_PAIR_ALPHA,
    );
    assert_close(
        CronbachAlpha.reliability(&grid, &[1, 2]).unwrap(),
        THREE_ITEM_WORST_PAIR_ALPHA,
    );
    assert_close(
        CronbachAlpha.reliability(&grid, &[0, 2]).unwrap(),
        THREE_ITEM_WORST_PAIR_ALPHA,
    );
}

#[test]
fn test_blank_candidate_counts_as_zero_total() {
    let grid = three_item_grid_with_blank_candidate();

    // pq ignores the blank candidate: same as the four-candidate grid
    assert_close(sum_pq(&grid, &[0, 1, 2]).unwrap(), 0.6875);
    // totals [2, 2, 2, 1, 0]
    assert_close(total_score_variance(&grid, &[0, 1, 2]).unwrap(), 0.8);
    assert_close(
        CronbachAlpha.reliability(&grid, &[0, 1, 2]).unwrap(),
        BLANK_CANDIDATE_ALPHA,
    );
}

#[test]
fn test_single_item_is_undefined() {
    let grid = three_item_grid();
    assert_eq!(
        CronbachAlpha.reliability(&grid, &[1]),
        Err(ReliabilityError::SingleItem)
    );
}

#[test]
fn test_empty_set_is_undefined() {
    let grid = three_item_grid();
    assert_eq!(
        CronbachAlpha.reliability(&grid, &[]),
        Err(ReliabilityError::EmptyItemSet)
    );
}

#[test]
fn test_zero_variance_is_undefined() {
    let grid = grid_from_columns(&[("i1", &[1, 0, 1]), ("i2", &[0, 1, 0])]);

    let err = CronbachAlpha.reliability(&grid, &[0, 1]).unwrap_err();
    assert_eq!(err, ReliabilityError::ZeroVariance);
    assert_eq!(
        err.to_string(),
        "zero-variance candidate scores for current item set"
    );
}

#[test]
fn test_item_without_respondents_is_undefined() {
    let grid = grid_from_optional_columns(&[
        ("i1", &[Some(1), Some(0), Some(1)]),
        ("i2", &[Some(1), Some(1), Some(0)]),
        ("ghost", &[None, None, None]),
    ]);

    assert_eq!(
        CronbachAlpha.reliability(&grid, &[0, 1, 2]),
        Err(ReliabilityError::NoRespondents {
            item: "ghost".to_string()
        })
    );
    // the other two items alone are fine
    assert!(CronbachAlpha.reliability(&grid, &[0, 1]).is_ok());
}

#[test]
fn test_single_candidate_is_undefined() {
    let grid = grid_from_columns(&[("i1", &[1]), ("i2", &[0])]);
    assert_eq!(
        CronbachAlpha.reliability(&grid, &[0, 1]),
        Err(ReliabilityError::TooFewCandidates { count: 1 })
    );
}

#[test]
fn test_tallies_do_not_depend_on_item_set() {
    let grid = three_item_grid();
    let before: Vec<_> = (0..3).map(|item| grid.item_tally(item)).collect();

    let subset_pq = sum_pq(&grid, &[0, 2]).unwrap();
    let individual: f64 = [0, 2].iter().map(|&i| before[i].pq().unwrap()).sum();

    assert_close(subset_pq, individual);
    assert_eq!(grid.item_tally(0), before[0]);
}

#[test]
fn test_repeated_calls_agree() {
    let grid = three_item_grid_with_blank_candidate();
    let first = CronbachAlpha.reliability(&grid, &[2, 0, 1]).unwrap();
    for _ in 0..10 {
        assert_eq!(CronbachAlpha.reliability(&grid, &[2, 0, 1]).unwrap(), first);
    }
}

// ============================================================================
// CountingEstimator
// ============================================================================

#[test]
fn test_counting_estimator() {
    let grid = three_item_grid();
    let estimator = CountingEstimator::new(CronbachAlpha);

    assert_close(
        estimator.reliability(&grid, &[0, 1]).unwrap(),
        THREE_ITEM_BEST_PAIR_ALPHA,
    );
    assert!(estimator.reliability(&grid, &[0]).is_err());
    assert_eq!(estimator.evaluations(), 2);
    assert_eq!(estimator.name(), "CronbachAlpha");

    estimator.reset();
    assert_eq!(estimator.evaluations(), 0);
}

#[test]
fn test_boxed_estimator() {
    let grid = three_item_grid();
    let boxed: Box<dyn ReliabilityEstimator> = Box::new(CronbachAlpha);
    assert_close(
        boxed.reliability(&grid, &[0, 1, 2]).unwrap(),
        THREE_ITEM_ALPHA,
    );
}

// ============================================================================
// Order invariance
// ============================================================================

fn columns_strategy() -> impl Strategy<Value = Vec<Vec<Option<u8>>>> {
    (2usize..7, 2usize..9).prop_flat_map(|(items, candidates)| {
        prop::collection::vec(
            prop::collection::vec(prop::option::of(0u8..=1), candidates),
            items,
        )
    })
}

fn build(columns: &[Vec<Option<u8>>]) -> formforge_core::ResponseGrid {
    let names: Vec<String> = (0..columns.len()).map(|i| format!("i{i}")).collect();
    let borrowed: Vec<(&str, &[Option<u8>])> = names
        .iter()
        .zip(columns)
        .map(|(name, column)| (name.as_str(), column.as_slice()))
        .collect();
    grid_from_optional_columns(&borrowed)
}

proptest! {
    #[test]
    fn prop_alpha_ignores_item_order(columns in columns_strategy()) {
        let grid = build(&columns);
        let forward: Vec<usize> = (0..columns.len()).collect();
        let backward: Vec<usize> = forward.iter().rev().copied().collect();

        match (
            CronbachAlpha.reliability(&grid, &forward),
            CronbachAlpha.reliability(&grid, &backward),
        ) {
            (Ok(a), Ok(b)) => prop_assert!((a - b).abs() < TOLERANCE),
            (Err(a), Err(b)) => prop_assert_eq!(discriminant(&a), discriminant(&b)),
            (a, b) => prop_assert!(false, "{:?} vs {:?}", a, b),
        }
    }

    #[test]
    fn prop_alpha_ignores_candidate_order(columns in columns_strategy()) {
        let grid = build(&columns);
        let reversed: Vec<Vec<Option<u8>>> = columns
            .iter()
            .map(|column| column.iter().rev().copied().collect())
            .collect();
        let reversed_grid = build(&reversed);
        let items: Vec<usize> = (0..columns.len()).collect();

        match (
            CronbachAlpha.reliability(&grid, &items),
            CronbachAlpha.reliability(&reversed_grid, &items),
        ) {
            (Ok(a), Ok(b)) => prop_assert!((a - b).abs() < TOLERANCE),
            (Err(a), Err(b)) => prop_assert_eq!(discriminant(&a), discriminant(&b)),
            (a, b) => prop_assert!(false, "{:?} vs {:?}", a, b),
        }
    }
}

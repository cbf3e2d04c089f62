//! Hand-checked elimination problems.
//!
//! Expected alphas are worked out from
//! `alpha = k/(k-1) · (1 − Σpq / var(totals))` with the sample variance.

use formforge_core::{FormProblem, ResponseGrid};

use crate::grid::{grid_from_columns, grid_from_optional_columns, problem_with_domains, single_domain_problem};

/// Alpha of the full three-item form of [`three_item_grid`].
pub const THREE_ITEM_ALPHA: f64 = -2.625;

/// Alpha after dropping `i3` from [`three_item_grid`].
pub const THREE_ITEM_BEST_PAIR_ALPHA: f64 = 0.5;

/// Alpha after dropping `i1` (or `i2`) from [`three_item_grid`].
pub const THREE_ITEM_WORST_PAIR_ALPHA: f64 = -1.5;

/// Three items, four candidates:
/// `i1=[1,1,0,0]`, `i2=[1,0,1,0]`, `i3=[0,1,1,1]`.
pub fn three_item_grid() -> ResponseGrid {
    grid_from_columns(&[
        ("i1", &[1, 1, 0, 0]),
        ("i2", &[1, 0, 1, 0]),
        ("i3", &[0, 1, 1, 1]),
    ])
}

/// [`three_item_grid`] in a single domain with bounds `[1, 3]`.
pub fn three_item_problem() -> FormProblem {
    single_domain_problem(three_item_grid(), 1, 3)
}

/// Alpha of [`three_item_grid_with_blank_candidate`]: totals `[2,2,2,1,0]`.
pub const BLANK_CANDIDATE_ALPHA: f64 = 0.2109375;

/// [`three_item_grid`] plus a fifth candidate who omitted every item.
pub fn three_item_grid_with_blank_candidate() -> ResponseGrid {
    grid_from_optional_columns(&[
        ("i1", &[Some(1), Some(1), Some(0), Some(0), None]),
        ("i2", &[Some(1), Some(0), Some(1), Some(0), None]),
        ("i3", &[Some(0), Some(1), Some(1), Some(1), None]),
    ])
}

/// Five items over six candidates, domain `A = {a1, a2}` pinned at its
/// minimum of two and domain `B = {b1, b2, b3}` with bounds `[1, 3]`.
///
/// Item order is `b1, a1, a2, b2, b3`. Every subset of two or more items
/// has non-zero total-score variance.
pub fn pinned_domain_problem() -> FormProblem {
    let grid = grid_from_columns(&[
        ("b1", &[1, 0, 1, 1, 0, 1]),
        ("a1", &[1, 1, 1, 0, 0, 0]),
        ("a2", &[1, 1, 0, 1, 0, 0]),
        ("b2", &[0, 1, 1, 0, 1, 0]),
        ("b3", &[1, 1, 0, 0, 1, 0]),
    ]);
    problem_with_domains(
        grid,
        &[("b1", "B"), ("a1", "A"), ("a2", "A"), ("b2", "B"), ("b3", "B")],
        &[("A", 2, 2), ("B", 1, 3)],
    )
}

/// Five items over four candidates where the first item `a1` belongs to
/// domain `A = {a1, a2}` pinned at its minimum of two, and dropping `a1`
/// gives a far higher alpha than dropping any `B` item.
///
/// With a target of four items the unchecked first item is removed even
/// though it breaks the blueprint; a checked reference removes `b3`.
pub fn unchecked_reference_problem() -> FormProblem {
    let grid = grid_from_columns(&[
        ("a1", &[0, 0, 1, 1]),
        ("b1", &[1, 1, 0, 0]),
        ("b2", &[1, 1, 0, 0]),
        ("b3", &[1, 1, 1, 0]),
        ("a2", &[1, 0, 0, 0]),
    ]);
    problem_with_domains(
        grid,
        &[("a1", "A"), ("b1", "B"), ("b2", "B"), ("b3", "B"), ("a2", "A")],
        &[("A", 2, 2), ("B", 1, 3)],
    )
}

/// Alpha after dropping `a1` from [`unchecked_reference_problem`].
pub const UNCHECKED_REFERENCE_ALPHA: f64 = 0.983_333_333_333_333_3;

/// Alpha after dropping `b3` from [`unchecked_reference_problem`].
pub const CHECKED_REFERENCE_ALPHA: f64 = -1.0 / 33.0;

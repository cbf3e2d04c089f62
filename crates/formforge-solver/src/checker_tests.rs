//! Tests for the blueprint checker.

use formforge_test::grid::{grid_from_columns, problem_with_domains, single_domain_problem};
use formforge_test::scenarios::{pinned_domain_problem, three_item_grid};

use crate::checker::{BlueprintChecker, ConstraintChecker};

fn index(problem: &formforge_core::FormProblem, id: &str) -> usize {
    problem.grid().item_index(id).unwrap()
}

#[test]
fn test_domain_at_minimum_is_protected() {
    let problem = pinned_domain_problem();
    let active = problem.all_items();

    for id in ["a1", "a2"] {
        assert!(!BlueprintChecker.is_removable(&problem, index(&problem, id), &active, 3));
    }
    for id in ["b1", "b2", "b3"] {
        assert!(BlueprintChecker.is_removable(&problem, index(&problem, id), &active, 3));
    }
}

#[test]
fn test_domain_above_minimum_allows_removal() {
    let problem = single_domain_problem(three_item_grid(), 2, 3);
    let active = problem.all_items();

    assert!(BlueprintChecker.is_removable(&problem, 0, &active, 2));
    // after one removal the domain sits at its minimum
    assert!(!BlueprintChecker.is_removable(&problem, 0, &[0, 1], 1));
}

#[test]
fn test_over_maximum_domain_needs_budget() {
    // B holds three items but allows one: two removals must come from B
    let grid = grid_from_columns(&[
        ("a1", &[1, 0, 1, 0]),
        ("a2", &[0, 1, 1, 0]),
        ("b1", &[1, 1, 0, 0]),
        ("b2", &[0, 0, 1, 1]),
        ("b3", &[1, 0, 0, 1]),
    ]);
    let problem = problem_with_domains(
        grid,
        &[("a1", "A"), ("a2", "A"), ("b1", "B"), ("b2", "B"), ("b3", "B")],
        &[("A", 0, 5), ("B", 0, 1)],
    );
    let active = problem.all_items();

    // one removal left, B is two over: only B items may go
    assert!(!BlueprintChecker.is_removable(&problem, 0, &active, 4));
    assert!(BlueprintChecker.is_removable(&problem, 2, &active, 4));

    // two removals left: A items become legal again
    assert!(BlueprintChecker.is_removable(&problem, 0, &active, 3));
}

#[test]
fn test_each_over_maximum_domain_checked_alone() {
    // A and B are each one over; the budget of one covers either alone
    let grid = grid_from_columns(&[
        ("a1", &[1, 0, 1, 0]),
        ("a2", &[0, 1, 1, 0]),
        ("b1", &[1, 1, 0, 0]),
        ("b2", &[0, 0, 1, 1]),
        ("c1", &[1, 0, 0, 1]),
    ]);
    let problem = problem_with_domains(
        grid,
        &[("a1", "A"), ("a2", "A"), ("b1", "B"), ("b2", "B"), ("c1", "C")],
        &[("A", 0, 1), ("B", 0, 1), ("C", 0, 1)],
    );
    let active = problem.all_items();

    // removing from A leaves B one over with one removal to spare
    assert!(BlueprintChecker.is_removable(&problem, 0, &active, 4));
    // removing C leaves both A and B over, each checked alone
    assert!(BlueprintChecker.is_removable(&problem, 4, &active, 4));
    assert!(BlueprintChecker.is_removable(&problem, 4, &active, 3));
}

#[test]
fn test_check_is_pure() {
    let problem = pinned_domain_problem();
    let active = problem.all_items();

    for item in 0..problem.item_count() {
        let first = BlueprintChecker.is_removable(&problem, item, &active, 4);
        let second = BlueprintChecker.is_removable(&problem, item, &active, 4);
        assert_eq!(first, second);
    }
}

#[test]
fn test_violations() {
    let problem = pinned_domain_problem();
    assert!(BlueprintChecker.violations(&problem, &problem.all_items()).is_empty());

    let a1 = index(&problem, "a1");
    let b1 = index(&problem, "b1");
    let violations = BlueprintChecker.violations(&problem, &[a1, b1]);

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].domain, "A");
    assert_eq!(violations[0].count, 1);
    assert_eq!(violations[0].min, 2);
    assert_eq!(
        violations[0].to_string(),
        "domain A has 1 items, blueprint allows 2..=2"
    );
}

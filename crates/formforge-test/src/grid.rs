//! Response grid builders.
//!
//! # Example
//!
//! ```
//! use formforge_test::grid::grid_from_columns;
//!
//! let grid = grid_from_columns(&[("i1", &[1, 0, 1]), ("i2", &[0, 0, 1])]);
//! assert_eq!(grid.item_count(), 2);
//! assert_eq!(grid.candidate_ids(), &["c1", "c2", "c3"]);
//! ```

use formforge_core::{Blueprint, DomainMap, FormProblem, ItemScore, ResponseGrid};

/// Builds a grid from fully answered item columns.
///
/// Candidates are named `c1`, `c2`, ... in column order.
pub fn grid_from_columns(columns: &[(&str, &[u8])]) -> ResponseGrid {
    let optional: Vec<(&str, Vec<Option<u8>>)> = columns
        .iter()
        .map(|(item, scores)| (*item, scores.iter().map(|&s| Some(s)).collect()))
        .collect();
    let borrowed: Vec<(&str, &[Option<u8>])> = optional
        .iter()
        .map(|(item, scores)| (*item, scores.as_slice()))
        .collect();
    grid_from_optional_columns(&borrowed)
}

/// Builds a grid from item columns where `None` marks an omission.
///
/// # Panics
///
/// Panics if the columns have different lengths.
pub fn grid_from_optional_columns(columns: &[(&str, &[Option<u8>])]) -> ResponseGrid {
    let candidates = columns.first().map(|(_, scores)| scores.len()).unwrap_or(0);
    let item_ids: Vec<String> = columns.iter().map(|(item, _)| item.to_string()).collect();
    let rows = (0..candidates)
        .map(|c| {
            let row = columns
                .iter()
                .map(|(item, scores)| {
                    assert_eq!(scores.len(), candidates, "column {item} has a different length");
                    ItemScore::from(scores[c])
                })
                .collect();
            (format!("c{}", c + 1), row)
        })
        .collect();
    ResponseGrid::from_rows(item_ids, rows).expect("rows match the item columns")
}

/// Puts every item of `grid` into domain `"D"` with the given bounds.
pub fn single_domain_problem(grid: ResponseGrid, min: usize, max: usize) -> FormProblem {
    let mut domains = DomainMap::new();
    for item in grid.item_ids() {
        domains.insert(item.clone(), "D");
    }
    let blueprint = Blueprint::new().with_domain("D", min, max);
    FormProblem::new(grid, &domains, &blueprint).expect("valid single-domain problem")
}

/// Builds a problem from `(item, domain)` and `(domain, min, max)` tables.
pub fn problem_with_domains(
    grid: ResponseGrid,
    domains: &[(&str, &str)],
    blueprint: &[(&str, usize, usize)],
) -> FormProblem {
    let domain_map = domains
        .iter()
        .fold(DomainMap::new(), |map, (item, domain)| map.with_item(*item, *domain));
    let blueprint = blueprint
        .iter()
        .fold(Blueprint::new(), |bp, (domain, min, max)| bp.with_domain(*domain, *min, *max));
    FormProblem::new(grid, &domain_map, &blueprint).expect("valid problem")
}

//! Validated elimination problem.

use crate::error::{FormForgeError, Result};

use super::{Blueprint, DomainBounds, DomainMap, ResponseGrid};

/// A response grid resolved against its domain map and blueprint.
///
/// Items and domains are addressed by dense indices: items by their grid
/// column, domains by their blueprint position. Construction checks that
/// every grid item has a domain, every such domain has blueprint bounds and
/// every bound satisfies `min <= max`.
#[derive(Debug, Clone)]
pub struct FormProblem {
    grid: ResponseGrid,
    domain_names: Vec<String>,
    bounds: Vec<DomainBounds>,
    item_domain: Vec<usize>,
}

impl FormProblem {
    pub fn new(grid: ResponseGrid, domains: &DomainMap, blueprint: &Blueprint) -> Result<Self> {
        let mut domain_names = Vec::with_capacity(blueprint.len());
        let mut bounds = Vec::with_capacity(blueprint.len());
        for (name, b) in blueprint.iter() {
            if b.min > b.max {
                return Err(FormForgeError::DomainModel(format!(
                    "domain {name} has minimum {} above maximum {}",
                    b.min, b.max
                )));
            }
            domain_names.push(name.to_string());
            bounds.push(b);
        }

        let mut item_domain = Vec::with_capacity(grid.item_count());
        for item in grid.item_ids() {
            let domain = domains.domain_of(item).ok_or_else(|| {
                FormForgeError::DomainModel(format!("item {item} has no domain"))
            })?;
            let idx = blueprint.position(domain).ok_or_else(|| {
                FormForgeError::DomainModel(format!(
                    "domain {domain} of item {item} is missing from the blueprint"
                ))
            })?;
            item_domain.push(idx);
        }

        Ok(Self {
            grid,
            domain_names,
            bounds,
            item_domain,
        })
    }

    pub fn grid(&self) -> &ResponseGrid {
        &self.grid
    }

    pub fn item_count(&self) -> usize {
        self.grid.item_count()
    }

    pub fn candidate_count(&self) -> usize {
        self.grid.candidate_count()
    }

    pub fn domain_count(&self) -> usize {
        self.domain_names.len()
    }

    pub fn item_id(&self, item: usize) -> &str {
        self.grid.item_id(item)
    }

    #[inline]
    pub fn domain_of(&self, item: usize) -> usize {
        self.item_domain[item]
    }

    pub fn domain_name(&self, domain: usize) -> &str {
        &self.domain_names[domain]
    }

    #[inline]
    pub fn bounds(&self, domain: usize) -> DomainBounds {
        self.bounds[domain]
    }

    /// Every item index, in grid order.
    pub fn all_items(&self) -> Vec<usize> {
        (0..self.item_count()).collect()
    }

    /// Number of items per domain among `items`.
    pub fn domain_counts(&self, items: &[usize]) -> Vec<usize> {
        let mut counts = vec![0; self.domain_count()];
        for &item in items {
            counts[self.item_domain[item]] += 1;
        }
        counts
    }
}

//! Content domains, blueprint bounds and answer keys.

use std::collections::HashMap;

use super::ItemScore;

/// Legal item-count range `[min, max]` for one domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DomainBounds {
    pub min: usize,
    pub max: usize,
}

impl DomainBounds {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, count: usize) -> bool {
        count >= self.min && count <= self.max
    }

    /// Items above the maximum, zero when within bounds.
    #[inline]
    pub fn overage(&self, count: usize) -> usize {
        count.saturating_sub(self.max)
    }
}

/// Per-domain bounds of the test blueprint, in file order.
///
/// Re-inserting a domain replaces its bounds but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Blueprint {
    domains: Vec<(String, DomainBounds)>,
    lookup: HashMap<String, usize>,
}

impl Blueprint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, domain: impl Into<String>, bounds: DomainBounds) {
        let domain = domain.into();
        match self.lookup.get(&domain) {
            Some(&idx) => self.domains[idx].1 = bounds,
            None => {
                self.lookup.insert(domain.clone(), self.domains.len());
                self.domains.push((domain, bounds));
            }
        }
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_domain(mut self, domain: impl Into<String>, min: usize, max: usize) -> Self {
        self.insert(domain, DomainBounds::new(min, max));
        self
    }

    pub fn get(&self, domain: &str) -> Option<DomainBounds> {
        self.lookup.get(domain).map(|&idx| self.domains[idx].1)
    }

    pub fn position(&self, domain: &str) -> Option<usize> {
        self.lookup.get(domain).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, DomainBounds)> {
        self.domains.iter().map(|(name, bounds)| (name.as_str(), *bounds))
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// Item id → domain label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainMap {
    domains: HashMap<String, String>,
}

impl DomainMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: impl Into<String>, domain: impl Into<String>) {
        self.domains.insert(item.into(), domain.into());
    }

    pub fn with_item(mut self, item: impl Into<String>, domain: impl Into<String>) -> Self {
        self.insert(item, domain);
        self
    }

    pub fn domain_of(&self, item: &str) -> Option<&str> {
        self.domains.get(item).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// Item id → credited response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyMap {
    keys: HashMap<String, String>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: impl Into<String>, key: impl Into<String>) {
        self.keys.insert(item.into(), key.into());
    }

    pub fn key_for(&self, item: &str) -> Option<&str> {
        self.keys.get(item).map(String::as_str)
    }

    /// Scores a raw response against the item's key.
    ///
    /// An empty response is an omission; otherwise the response must equal
    /// the key exactly to be credited. Returns `None` for an unkeyed item.
    pub fn score(&self, item: &str, response: &str) -> Option<ItemScore> {
        let key = self.key_for(item)?;
        Some(if response.is_empty() {
            ItemScore::Omitted
        } else if response == key {
            ItemScore::Correct
        } else {
            ItemScore::Incorrect
        })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

//! Working item set and removal log.

use std::ops::Deref;

/// Items still on the form, in their original grid order.
///
/// The set only shrinks. Trial removals are made on snapshots returned by
/// [`without`](Self::without) so that a scan never observes another
/// candidate's tentative removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveItemSet {
    items: Vec<usize>,
}

impl ActiveItemSet {
    pub fn new(items: Vec<usize>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[usize] {
        &self.items
    }

    /// Copy of this set with the item at `position` removed.
    pub fn without(&self, position: usize) -> ActiveItemSet {
        let mut items = Vec::with_capacity(self.items.len().saturating_sub(1));
        items.extend_from_slice(&self.items[..position]);
        items.extend_from_slice(&self.items[position + 1..]);
        ActiveItemSet { items }
    }

    /// Position of `item` in the set.
    pub fn position_of(&self, item: usize) -> Option<usize> {
        self.items.iter().position(|&i| i == item)
    }

    /// Removes and returns the item at `position`.
    pub(crate) fn remove_at(&mut self, position: usize) -> usize {
        self.items.remove(position)
    }
}

impl Deref for ActiveItemSet {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.items
    }
}

/// Items removed so far, in removal order. Append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalLog {
    removed: Vec<usize>,
}

impl RemovalLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, item: usize) {
        self.removed.push(item);
    }

    pub fn items(&self) -> &[usize] {
        &self.removed
    }

    pub fn len(&self) -> usize {
        self.removed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }

    pub fn contains(&self, item: usize) -> bool {
        self.removed.contains(&item)
    }
}

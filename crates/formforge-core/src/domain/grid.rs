//! Scored response grid.

use std::collections::HashMap;

use thiserror::Error;

use crate::error::{FormForgeError, Result};

/// Score of a single candidate on a single item.
///
/// Omitted responses are kept distinct from incorrect ones: they are
/// excluded from an item's respondent count and add nothing to a
/// candidate's total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemScore {
    Correct,
    Incorrect,
    #[default]
    Omitted,
}

impl ItemScore {
    /// Numeric value of the score, `None` for an omission.
    #[inline]
    pub fn value(self) -> Option<u32> {
        match self {
            ItemScore::Correct => Some(1),
            ItemScore::Incorrect => Some(0),
            ItemScore::Omitted => None,
        }
    }

    /// Points contributed to a candidate total.
    #[inline]
    pub fn points(self) -> u32 {
        self.value().unwrap_or(0)
    }

    #[inline]
    pub fn is_answered(self) -> bool {
        !matches!(self, ItemScore::Omitted)
    }
}

impl From<Option<u8>> for ItemScore {
    fn from(value: Option<u8>) -> Self {
        match value {
            None => ItemScore::Omitted,
            Some(0) => ItemScore::Incorrect,
            Some(_) => ItemScore::Correct,
        }
    }
}

/// Per-item response counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemTally {
    /// Candidates scored correct.
    pub ones: usize,
    /// Candidates with a non-omitted response.
    pub answered: usize,
}

impl ItemTally {
    /// Item variance proxy `ones·(answered−ones) / answered²`.
    ///
    /// Returns `None` when nobody answered the item.
    pub fn pq(&self) -> Option<f64> {
        if self.answered == 0 {
            return None;
        }
        let ones = self.ones as f64;
        let answered = self.answered as f64;
        Some(ones * (answered - ones) / (answered * answered))
    }

    /// Proportion of respondents answering correctly.
    pub fn p_value(&self) -> Option<f64> {
        if self.answered == 0 {
            None
        } else {
            Some(self.ones as f64 / self.answered as f64)
        }
    }
}

/// Candidate × item matrix of scored responses.
///
/// Candidates and items keep the order in which they first appeared in the
/// response log. Every candidate has a cell for every item; cells never
/// recorded are `Omitted`. The grid is immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseGrid {
    candidate_ids: Vec<String>,
    item_ids: Vec<String>,
    item_lookup: HashMap<String, usize>,
    // row-major: candidate * item_count + item
    scores: Vec<ItemScore>,
}

impl ResponseGrid {
    /// Builds a grid from one row of scores per candidate.
    ///
    /// # Errors
    ///
    /// Returns [`FormForgeError::DomainModel`] if a row length differs from
    /// the number of items.
    pub fn from_rows(item_ids: Vec<String>, rows: Vec<(String, Vec<ItemScore>)>) -> Result<Self> {
        let item_count = item_ids.len();
        let mut candidate_ids = Vec::with_capacity(rows.len());
        let mut scores = Vec::with_capacity(rows.len() * item_count);
        for (candidate, row) in rows {
            if row.len() != item_count {
                return Err(FormForgeError::DomainModel(format!(
                    "candidate {candidate} has {} scores for {item_count} items",
                    row.len()
                )));
            }
            candidate_ids.push(candidate);
            scores.extend(row);
        }
        let item_lookup = item_ids
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.clone(), idx))
            .collect();
        Ok(Self {
            candidate_ids,
            item_ids,
            item_lookup,
            scores,
        })
    }

    pub fn candidate_count(&self) -> usize {
        self.candidate_ids.len()
    }

    pub fn item_count(&self) -> usize {
        self.item_ids.len()
    }

    pub fn candidate_ids(&self) -> &[String] {
        &self.candidate_ids
    }

    pub fn item_ids(&self) -> &[String] {
        &self.item_ids
    }

    pub fn item_id(&self, item: usize) -> &str {
        &self.item_ids[item]
    }

    /// Dense index of an item id.
    pub fn item_index(&self, id: &str) -> Option<usize> {
        self.item_lookup.get(id).copied()
    }

    #[inline]
    pub fn score(&self, candidate: usize, item: usize) -> ItemScore {
        self.scores[candidate * self.item_ids.len() + item]
    }

    /// All scores of one candidate, in item order.
    pub fn candidate_row(&self, candidate: usize) -> &[ItemScore] {
        let width = self.item_ids.len();
        &self.scores[candidate * width..(candidate + 1) * width]
    }

    /// Counts correct and answered responses for an item.
    pub fn item_tally(&self, item: usize) -> ItemTally {
        let mut tally = ItemTally::default();
        for candidate in 0..self.candidate_count() {
            if let Some(value) = self.score(candidate, item).value() {
                tally.ones += value as usize;
                tally.answered += 1;
            }
        }
        tally
    }

    /// Total points of a candidate restricted to `items`.
    pub fn candidate_total(&self, candidate: usize, items: &[usize]) -> u32 {
        let row = self.candidate_row(candidate);
        items.iter().map(|&item| row[item].points()).sum()
    }
}

/// A second record for a (candidate, item) pair already in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("duplicate response for candidate {candidate} on item {item}")]
pub struct DuplicateResponse {
    pub candidate: String,
    pub item: String,
}

/// Incremental builder used by the response log loader.
#[derive(Debug, Default)]
pub struct ResponseGridBuilder {
    candidate_ids: Vec<String>,
    candidate_lookup: HashMap<String, usize>,
    item_ids: Vec<String>,
    item_lookup: HashMap<String, usize>,
    cells: HashMap<(usize, usize), ItemScore>,
}

impl ResponseGridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one scored response.
    ///
    /// Unknown candidates and items are appended in first-appearance order.
    pub fn record(
        &mut self,
        candidate: &str,
        item: &str,
        score: ItemScore,
    ) -> std::result::Result<(), DuplicateResponse> {
        let c = intern(&mut self.candidate_ids, &mut self.candidate_lookup, candidate);
        let i = intern(&mut self.item_ids, &mut self.item_lookup, item);
        if self.cells.insert((c, i), score).is_some() {
            return Err(DuplicateResponse {
                candidate: candidate.to_string(),
                item: item.to_string(),
            });
        }
        Ok(())
    }

    pub fn candidate_count(&self) -> usize {
        self.candidate_ids.len()
    }

    pub fn item_count(&self) -> usize {
        self.item_ids.len()
    }

    pub fn build(self) -> ResponseGrid {
        let width = self.item_ids.len();
        let mut scores = vec![ItemScore::Omitted; self.candidate_ids.len() * width];
        for ((candidate, item), score) in self.cells {
            scores[candidate * width + item] = score;
        }
        ResponseGrid {
            candidate_ids: self.candidate_ids,
            item_ids: self.item_ids,
            item_lookup: self.item_lookup,
            scores,
        }
    }
}

fn intern(ids: &mut Vec<String>, lookup: &mut HashMap<String, usize>, id: &str) -> usize {
    if let Some(&idx) = lookup.get(id) {
        return idx;
    }
    let idx = ids.len();
    ids.push(id.to_string());
    lookup.insert(id.to_string(), idx);
    idx
}

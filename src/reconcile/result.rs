//! Reconciliation result types.

use crate::value::Row;
use serde::Serialize;
use std::fmt;

/// ReconciliationResult holds the divergences between two collections.
///
/// No left row appears in both `only_in_left` and `differing`. Rows that
/// match exactly are not returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconciliationResult {
    /// Left rows whose key is absent from the right collection.
    pub only_in_left: Vec<Row>,
    /// Right rows whose key is absent from the left collection.
    pub only_in_right: Vec<Row>,
    /// Left rows that differ from a right row with the same key, carrying
    /// the right row's secondary identifier when it has one.
    pub differing: Vec<Row>,
    #[serde(skip)]
    pub(crate) matched_pairs: usize,
}

/// Summary counts one reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub only_in_left: usize,
    pub only_in_right: usize,
    pub differing: usize,
    /// Key-equal pairs compared, matching or not.
    pub matched_pairs: usize,
}

impl ReconciliationResult {
    /// Returns true if both collections agree on every row.
    pub fn is_consistent(&self) -> bool {
        self.only_in_left.is_empty() && self.only_in_right.is_empty() && self.differing.is_empty()
    }

    /// Returns the number of key-equal pairs that were compared.
    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn summary(&self) -> Summary {
        Summary {
            only_in_left: self.only_in_left.len(),
            only_in_right: self.only_in_right.len(),
            differing: self.differing.len(),
            matched_pairs: self.matched_pairs,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} only in left, {} only in right, {} differing of {} matched pairs",
            self.only_in_left, self.only_in_right, self.differing, self.matched_pairs
        )
    }
}

//! Primary key index over one row collection.

use super::{DuplicateKeyPolicy, ReconcileError, Side};
use crate::value::Row;
use std::collections::HashMap;

/// KeyIndex maps each stringified primary key to the positions of the rows
/// carrying it, and remembers the key of every position.
#[derive(Debug, Clone, Default)]
pub(crate) struct KeyIndex {
    keys: Vec<String>,
    positions: HashMap<String, Vec<usize>>,
}

impl KeyIndex {
    /// Builds the index in one pass over `rows`.
    pub(crate) fn build(
        side: Side,
        rows: &[Row],
        primary_key: &str,
        policy: DuplicateKeyPolicy,
    ) -> Result<KeyIndex, ReconcileError> {
        let mut index = KeyIndex {
            keys: Vec::with_capacity(rows.len()),
            positions: HashMap::with_capacity(rows.len()),
        };

        for (position, row) in rows.iter().enumerate() {
            let key = key_of(row, primary_key)
                .ok_or_else(|| ReconcileError::row_missing_key_field(side, position, primary_key))?;

            let slots = index.positions.entry(key.clone()).or_default();
            if let (DuplicateKeyPolicy::Reject, Some(&first_row)) = (policy, slots.first()) {
                return Err(ReconcileError::duplicate_primary_key(side, key, first_row, position));
            }
            slots.push(position);
            index.keys.push(key);
        }

        Ok(index)
    }

    /// Returns the key of the row at `position`.
    pub(crate) fn key_at(&self, position: usize) -> &str {
        &self.keys[position]
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Returns the positions of the rows carrying `key`, in collection order.
    pub(crate) fn positions(&self, key: &str) -> &[usize] {
        self.positions.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the number of distinct keys.
    pub(crate) fn distinct_keys(&self) -> usize {
        self.positions.len()
    }
}

/// Returns the stringified primary key of a row, or `None` when the field is
/// missing or null.
pub(crate) fn key_of(row: &Row, primary_key: &str) -> Option<String> {
    row.get(primary_key).and_then(|value| value.key_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn rows(keys: &[Value]) -> Vec<Row> {
        keys.iter()
            .map(|k| [("id", k.clone())].into_iter().collect())
            .collect()
    }

    #[test]
    fn test_index_positions() {
        let rows = rows(&[Value::from("a"), Value::Int(2), Value::from("c")]);
        let index = KeyIndex::build(Side::Left, &rows, "id", DuplicateKeyPolicy::Reject).unwrap();

        assert_eq!(index.distinct_keys(), 3);
        assert_eq!(index.key_at(1), "2");
        assert!(index.contains("2"));
        assert_eq!(index.positions("c"), &[2]);
        assert!(index.positions("z").is_empty());
    }

    #[test]
    fn test_index_rejects_duplicates() {
        let rows = rows(&[Value::from("1"), Value::from("2"), Value::Int(1)]);
        let err = KeyIndex::build(Side::Right, &rows, "id", DuplicateKeyPolicy::Reject).unwrap_err();
        assert_eq!(err, ReconcileError::duplicate_primary_key(Side::Right, "1", 0, 2));
    }

    #[test]
    fn test_index_collapses_duplicates_for_cross_product() {
        let rows = rows(&[Value::from("1"), Value::from("2"), Value::from("1")]);
        let index =
            KeyIndex::build(Side::Left, &rows, "id", DuplicateKeyPolicy::CrossProduct).unwrap();

        assert_eq!(index.distinct_keys(), 2);
        assert_eq!(index.positions("1"), &[0, 2]);
    }

    #[test]
    fn test_index_requires_key() {
        let rows = vec![Row::new()];
        let err = KeyIndex::build(Side::Left, &rows, "id", DuplicateKeyPolicy::Reject).unwrap_err();
        assert_eq!(err, ReconcileError::row_missing_key_field(Side::Left, 0, "id"));
    }
}

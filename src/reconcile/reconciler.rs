//! The reconciliation engine.

use super::index::{key_of, KeyIndex};
use super::{ReconcileError, ReconcileOptions, ReconciliationResult, Side};
use crate::value::{normalize, rows_from_json_value, Row};
use tracing::{debug, info, warn};

/// Reconciler compares a left (system-of-record) collection against a right
/// (downstream) collection under a primary key.
///
/// It holds only its options; every call to [`Reconciler::reconcile`] is
/// independent, so one instance can be shared freely across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciler {
    options: ReconcileOptions,
}

impl Reconciler {
    pub fn new(options: ReconcileOptions) -> Self {
        Reconciler { options }
    }

    pub fn options(&self) -> &ReconcileOptions {
        &self.options
    }

    /// Reconciles `left` against `right`.
    ///
    /// Rows are normalized (null becomes the empty string) before indexing,
    /// and every output row is a normalized copy. The inputs are never
    /// modified.
    pub fn reconcile(
        &self,
        left: &[Row],
        right: &[Row],
    ) -> Result<ReconciliationResult, ReconcileError> {
        let primary_key = self.options.primary_key.as_str();
        if primary_key.is_empty() {
            return Err(ReconcileError::MissingPrimaryKeyArgument);
        }

        validate_keys(Side::Left, left, primary_key)?;
        validate_keys(Side::Right, right, primary_key)?;

        if right.is_empty() {
            warn!(primary_key, "right collection is empty; every left row will be exclusive");
        }

        let left = normalize(left);
        let right = normalize(right);

        let policy = self.options.duplicate_keys;
        let left_index = KeyIndex::build(Side::Left, &left, primary_key, policy)?;
        let right_index = KeyIndex::build(Side::Right, &right, primary_key, policy)?;

        let mut result = ReconciliationResult::default();

        for (left_pos, left_row) in left.iter().enumerate() {
            let key = left_index.key_at(left_pos);
            let partners = right_index.positions(key);
            if partners.is_empty() {
                result.only_in_left.push(left_row.clone());
                continue;
            }

            for &right_pos in partners {
                result.matched_pairs += 1;
                let right_row = &right[right_pos];
                let mismatched = self.mismatched_fields(left_row, right_row);
                if mismatched.is_empty() {
                    continue;
                }

                debug!(
                    key,
                    left_row = left_pos,
                    right_row = right_pos,
                    fields = ?mismatched,
                    "rows diverge"
                );
                result.differing.push(self.divergent_copy(left_row, right_row));
            }
        }

        result.only_in_right = right
            .iter()
            .enumerate()
            .filter(|(pos, _)| !left_index.contains(right_index.key_at(*pos)))
            .map(|(_, row)| row.clone())
            .collect();

        info!(
            primary_key,
            left_rows = left.len(),
            right_rows = right.len(),
            left_keys = left_index.distinct_keys(),
            right_keys = right_index.distinct_keys(),
            summary = %result.summary(),
            "reconciled"
        );

        Ok(result)
    }

    /// Returns the names of the fields of `left` that do not match `right`.
    ///
    /// The comparison is driven by the left row: the primary key and the
    /// secondary identifier are skipped, and fields only the right row has
    /// are ignored. A field missing from the right row matches only if the
    /// left value is empty (or null). An empty result means the pair matches.
    pub fn mismatched_fields(&self, left: &Row, right: &Row) -> Vec<String> {
        let secondary = self.options.secondary_identifier.as_deref();

        left.iter()
            .filter(|(name, _)| {
                name.as_str() != self.options.primary_key && Some(name.as_str()) != secondary
            })
            .filter(|(name, value)| match right.get(name) {
                Some(other) => !value.normalized_eq(other),
                None => !value.normalized().is_blank(),
            })
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Copies `left`, taking the secondary identifier from `right` when the
    /// right row has it set.
    fn divergent_copy(&self, left: &Row, right: &Row) -> Row {
        let mut row = left.clone();
        if let Some(field) = self.options.secondary_identifier.as_deref() {
            if let Some(value) = right.get(field).filter(|v| !v.normalized().is_blank()) {
                row.set(field, value.clone());
            }
        }
        row
    }
}

/// Reconciles two collections under `primary_key` with default options.
pub fn reconcile(
    left: &[Row],
    right: &[Row],
    primary_key: &str,
) -> Result<ReconciliationResult, ReconcileError> {
    let options = ReconcileOptions::builder()
        .primary_key(primary_key)
        .build()?;
    Reconciler::new(options).reconcile(left, right)
}

/// Reads one side's collection from a decoded JSON document.
pub fn decode_rows(side: Side, json: &serde_json::Value) -> Result<Vec<Row>, ReconcileError> {
    rows_from_json_value(json).map_err(|source| ReconcileError::malformed(side, source))
}

/// Fails on the first row lacking a non-null primary key.
fn validate_keys(side: Side, rows: &[Row], primary_key: &str) -> Result<(), ReconcileError> {
    match rows.iter().position(|row| key_of(row, primary_key).is_none()) {
        Some(row) => Err(ReconcileError::row_missing_key_field(side, row, primary_key)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn row(fields: &[(&str, Value)]) -> Row {
        fields.iter().cloned().collect()
    }

    #[test]
    fn test_mismatched_fields() {
        let reconciler = Reconciler::new(ReconcileOptions::new("id"));
        let left = row(&[
            ("id", "1".into()),
            ("name", "Alice".into()),
            ("city", "Oslo".into()),
            ("note", Value::Null),
            ("dv_guid", "mine".into()),
        ]);
        let right = row(&[
            ("id", "1".into()),
            ("name", "Alicia".into()),
            ("city", "Oslo".into()),
            ("dv_guid", "theirs".into()),
            ("extra", "ignored".into()),
        ]);

        assert_eq!(reconciler.mismatched_fields(&left, &right), vec!["name".to_string()]);
    }

    #[test]
    fn test_missing_right_field_is_a_mismatch_unless_empty() {
        let reconciler = Reconciler::new(ReconcileOptions::new("id"));
        let right = row(&[("id", "1".into())]);

        let left = row(&[("id", "1".into()), ("name", "".into())]);
        assert!(reconciler.mismatched_fields(&left, &right).is_empty());

        let left = row(&[("id", "1".into()), ("name", "x".into())]);
        assert_eq!(reconciler.mismatched_fields(&left, &right), vec!["name".to_string()]);
    }

    #[test]
    fn test_divergent_copy_keeps_left_without_identifier() {
        let reconciler = Reconciler::new(ReconcileOptions::new("id"));
        let left = row(&[("id", "1".into()), ("dv_guid", "old".into())]);

        let right = row(&[("id", "1".into()), ("dv_guid", "".into())]);
        assert_eq!(reconciler.divergent_copy(&left, &right), left);

        let right = row(&[("id", "1".into()), ("dv_guid", "new".into())]);
        assert_eq!(
            reconciler.divergent_copy(&left, &right).get("dv_guid"),
            Some(&Value::from("new"))
        );
    }

    #[test]
    fn test_decode_rows_reports_side() {
        let json = serde_json::json!([{"id": 1}, "oops"]);
        let err = decode_rows(Side::Right, &json).unwrap_err();
        assert_eq!(err.side(), Some(Side::Right));
        assert_eq!(err.row(), Some(1));
    }
}

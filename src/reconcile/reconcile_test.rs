//! Scenario tests for reconciliation.

#[cfg(test)]
mod tests {
    use crate::reconcile::{
        reconcile, DuplicateKeyPolicy, ReconcileError, ReconcileOptions, Reconciler, Side,
    };
    use crate::value::{from_json, normalize, Row, RowError, Value};
    use pretty_assertions::assert_eq;

    fn rows(json: &str) -> Vec<Row> {
        from_json(json).unwrap()
    }

    fn cross_product(primary_key: &str) -> Reconciler {
        Reconciler::new(
            ReconcileOptions::builder()
                .primary_key(primary_key)
                .duplicate_keys(DuplicateKeyPolicy::CrossProduct)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_reference_scenario() {
        let left = rows(r#"[{"id":"1","name":"Alice"}]"#);
        let right = rows(
            r#"[{"id":"1","name":"Alicia","dv_guid":"g1"},{"id":"2","name":"Bob"}]"#,
        );

        let result = reconcile(&left, &right, "id").unwrap();

        assert!(result.only_in_left.is_empty());
        assert_eq!(result.only_in_right, rows(r#"[{"id":"2","name":"Bob"}]"#));
        assert_eq!(
            result.differing,
            rows(r#"[{"id":"1","name":"Alice","dv_guid":"g1"}]"#)
        );
        assert_eq!(result.matched_pairs(), 1);
    }

    #[test]
    fn test_identical_inputs_are_consistent() {
        let table = rows(
            r#"[
                {"id": 1, "name": "Alice", "age": 30, "note": null},
                {"id": 2, "name": "Bob", "age": 41.5, "active": true},
                {"id": 3, "name": "", "age": null}
            ]"#,
        );

        let result = reconcile(&table, &table, "id").unwrap();

        assert!(result.is_consistent());
        assert_eq!(result.matched_pairs(), 3);
    }

    #[test]
    fn test_exclusivity_preserves_order() {
        let left = rows(r#"[{"id":"c"},{"id":"a"},{"id":"x"},{"id":"b"}]"#);
        let right = rows(r#"[{"id":"z"},{"id":"x"},{"id":"y"}]"#);

        let result = reconcile(&left, &right, "id").unwrap();

        assert_eq!(
            result.only_in_left,
            rows(r#"[{"id":"c"},{"id":"a"},{"id":"b"}]"#)
        );
        assert_eq!(result.only_in_right, rows(r#"[{"id":"z"},{"id":"y"}]"#));
        assert!(result.differing.is_empty());
    }

    #[test]
    fn test_swapping_sides_swaps_exclusives() {
        let left = rows(r#"[{"id":"1","v":"a"},{"id":"2","v":"b"},{"id":"3","v":"c"}]"#);
        let right = rows(r#"[{"id":"2","v":"B"},{"id":"4","v":"d"}]"#);

        let forward = reconcile(&left, &right, "id").unwrap();
        let backward = reconcile(&right, &left, "id").unwrap();

        assert_eq!(forward.only_in_left, backward.only_in_right);
        assert_eq!(forward.only_in_right, backward.only_in_left);
        assert_eq!(forward.differing, rows(r#"[{"id":"2","v":"b"}]"#));
        assert_eq!(backward.differing, rows(r#"[{"id":"2","v":"B"}]"#));
    }

    #[test]
    fn test_differing_is_driven_by_left_fields() {
        let left = rows(r#"[{"id":"1","name":"Alice"}]"#);
        let right = rows(r#"[{"id":"1","name":"Alice","created_by":"sync"}]"#);

        let forward = reconcile(&left, &right, "id").unwrap();
        assert!(forward.is_consistent());

        let backward = reconcile(&right, &left, "id").unwrap();
        assert_eq!(
            backward.differing,
            rows(r#"[{"id":"1","name":"Alice","created_by":"sync"}]"#)
        );
    }

    #[test]
    fn test_partition_completeness() {
        let left = rows(
            r#"[{"id":"1","v":"a"},{"id":"2","v":"b"},{"id":"3","v":"c"},{"id":"4","v":"d"}]"#,
        );
        let right = rows(r#"[{"id":"2","v":"b"},{"id":"3","v":"x"},{"id":"5","v":"e"}]"#);

        let result = reconcile(&left, &right, "id").unwrap();

        // Every left row is either exclusive or part of a compared pair.
        assert_eq!(result.only_in_left.len() + result.matched_pairs(), left.len());
        assert_eq!(result.only_in_left, rows(r#"[{"id":"1","v":"a"},{"id":"4","v":"d"}]"#));
        assert_eq!(result.differing, rows(r#"[{"id":"3","v":"c"}]"#));
    }

    #[test]
    fn test_null_and_empty_string_are_equivalent() {
        let left = rows(r#"[{"id":"1","a":null,"b":""}]"#);
        let right = rows(r#"[{"id":"1","a":"","b":null}]"#);

        let result = reconcile(&left, &right, "id").unwrap();
        assert!(result.is_consistent());
    }

    #[test]
    fn test_null_left_field_missing_on_right_matches() {
        let left = rows(r#"[{"id":"1","a":null,"b":""}]"#);
        let right = rows(r#"[{"id":"1"}]"#);

        let result = reconcile(&left, &right, "id").unwrap();
        assert!(result.is_consistent());
    }

    #[test]
    fn test_outputs_are_normalized() {
        let left = rows(r#"[{"id":"1","a":null},{"id":"2","a":null}]"#);
        let right = rows(r#"[{"id":"2","a":"set","b":null},{"id":"3","b":null}]"#);

        let result = reconcile(&left, &right, "id").unwrap();

        assert_eq!(result.only_in_left, rows(r#"[{"id":"1","a":""}]"#));
        assert_eq!(result.only_in_right, rows(r#"[{"id":"3","b":""}]"#));
        assert_eq!(result.differing, rows(r#"[{"id":"2","a":""}]"#));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let left = rows(r#"[{"id":"1","a":null,"b":"x"},{"id":"2","a":"y"},{"id":"9"}]"#);
        let right = rows(
            r#"[{"id":"1","a":"","b":"z","dv_guid":null},{"id":"2","a":null,"dv_guid":"g2"},{"id":"7"}]"#,
        );

        let raw = reconcile(&left, &right, "id").unwrap();
        let normalized = reconcile(&normalize(&left), &normalize(&right), "id").unwrap();

        assert_eq!(raw, normalized);
    }

    #[test]
    fn test_inputs_are_not_modified() {
        let left = rows(r#"[{"id":"1","a":null}]"#);
        let right = rows(r#"[{"id":"1","a":"b","dv_guid":"g"}]"#);
        let (left_before, right_before) = (left.clone(), right.clone());

        reconcile(&left, &right, "id").unwrap();

        assert_eq!(left, left_before);
        assert_eq!(right, right_before);
    }

    #[test]
    fn test_secondary_identifier_propagation() {
        let left = rows(r#"[{"id":"1","name":"Alice","dv_guid":"stale"},{"id":"2","name":"Bob"}]"#);
        let right = rows(
            r#"[{"id":"1","name":"Al","dv_guid":"g1"},{"id":"2","name":"Robert","dv_guid":null}]"#,
        );

        let result = reconcile(&left, &right, "id").unwrap();

        assert_eq!(
            result.differing,
            rows(r#"[{"id":"1","name":"Alice","dv_guid":"g1"},{"id":"2","name":"Bob"}]"#)
        );
    }

    #[test]
    fn test_secondary_identifier_is_not_compared() {
        let left = rows(r#"[{"id":"1","name":"Alice","dv_guid":"a"}]"#);
        let right = rows(r#"[{"id":"1","name":"Alice","dv_guid":"b"}]"#);

        let result = reconcile(&left, &right, "id").unwrap();
        assert!(result.is_consistent());
    }

    #[test]
    fn test_custom_secondary_identifier() {
        let options = ReconcileOptions::builder()
            .primary_key("contest_id")
            .secondary_identifier("crm_id")
            .build()
            .unwrap();
        let left = rows(r#"[{"contest_id":10,"title":"Mayor"}]"#);
        let right = rows(r#"[{"contest_id":10,"title":"Mayor ","crm_id":"c-10","dv_guid":"g"}]"#);

        let result = Reconciler::new(options).reconcile(&left, &right).unwrap();

        assert_eq!(
            result.differing,
            rows(r#"[{"contest_id":10,"title":"Mayor","crm_id":"c-10"}]"#)
        );
    }

    #[test]
    fn test_keys_match_by_stringified_form() {
        let left = rows(r#"[{"id":1,"v":"a"},{"id":2.0,"v":"b"}]"#);
        let right = rows(r#"[{"id":"1","v":"a"},{"id":"2","v":"b"}]"#);

        let result = reconcile(&left, &right, "id").unwrap();
        assert!(result.is_consistent());
    }

    #[test]
    fn test_field_values_are_compared_by_type() {
        let left = rows(r#"[{"id":"1","n":1,"f":2}]"#);
        let right = rows(r#"[{"id":"1","n":"1","f":2.0}]"#);

        let reconciler = Reconciler::new(ReconcileOptions::new("id"));
        assert_eq!(
            reconciler.mismatched_fields(&left[0], &right[0]),
            vec!["n".to_string()]
        );
    }

    #[test]
    fn test_empty_left_makes_every_right_row_exclusive() {
        let right = rows(r#"[{"id":"1"},{"id":"2"}]"#);

        let result = reconcile(&[], &right, "id").unwrap();

        assert_eq!(result.only_in_right, right);
        assert!(result.only_in_left.is_empty());
    }

    #[test]
    fn test_empty_right_is_valid() {
        let left = rows(r#"[{"id":"1"}]"#);
        let result = reconcile(&left, &[], "id").unwrap();
        assert_eq!(result.only_in_left, left);
    }

    #[test]
    fn test_missing_primary_key_argument() {
        let table = rows(r#"[{"id":"1"}]"#);
        assert_eq!(
            reconcile(&table, &table, ""),
            Err(ReconcileError::MissingPrimaryKeyArgument)
        );

        let reconciler = Reconciler::new(ReconcileOptions::new(""));
        assert_eq!(
            reconciler.reconcile(&table, &table),
            Err(ReconcileError::MissingPrimaryKeyArgument)
        );
    }

    #[test]
    fn test_primary_key_argument_checked_before_rows() {
        let bad = rows(r#"[{"name":"no key"}]"#);
        assert_eq!(
            reconcile(&bad, &bad, ""),
            Err(ReconcileError::MissingPrimaryKeyArgument)
        );
    }

    #[test]
    fn test_row_missing_key_field_fails_fast() {
        let left = rows(r#"[{"id":"1"},{"name":"x"},{"other":"y"}]"#);
        let right = rows(r#"[{"name":"z"}]"#);

        assert_eq!(
            reconcile(&left, &right, "id"),
            Err(ReconcileError::row_missing_key_field(Side::Left, 1, "id"))
        );
    }

    #[test]
    fn test_null_key_is_missing() {
        let left = rows(r#"[{"id":"1"}]"#);
        let right = rows(r#"[{"id":"1"},{"id":null}]"#);

        assert_eq!(
            reconcile(&left, &right, "id"),
            Err(ReconcileError::row_missing_key_field(Side::Right, 1, "id"))
        );
    }

    #[test]
    fn test_duplicate_keys_rejected_by_default() {
        let left = rows(r#"[{"id":"1"},{"id":"2"}]"#);
        let right = rows(r#"[{"id":"2","v":"a"},{"id":"2","v":"b"}]"#);

        assert_eq!(
            reconcile(&left, &right, "id"),
            Err(ReconcileError::duplicate_primary_key(Side::Right, "2", 0, 1))
        );
    }

    #[test]
    fn test_duplicate_keys_cross_product() {
        let left = rows(r#"[{"id":"1","v":"a"},{"id":"1","v":"b"},{"id":"3","v":"c"}]"#);
        let right = rows(
            r#"[{"id":"1","v":"a","dv_guid":"r0"},{"id":"1","v":"x","dv_guid":"r1"},{"id":"4","v":"d"},{"id":"4","v":"e"}]"#,
        );

        let result = cross_product("id").reconcile(&left, &right).unwrap();

        assert_eq!(result.matched_pairs(), 4);
        assert_eq!(result.only_in_left, rows(r#"[{"id":"3","v":"c"}]"#));
        assert_eq!(
            result.only_in_right,
            rows(r#"[{"id":"4","v":"d"},{"id":"4","v":"e"}]"#)
        );
        // Ordered by left position, then right position.
        assert_eq!(
            result.differing,
            rows(
                r#"[
                    {"id":"1","v":"a","dv_guid":"r1"},
                    {"id":"1","v":"b","dv_guid":"r0"},
                    {"id":"1","v":"b","dv_guid":"r1"}
                ]"#
            )
        );
    }

    #[test]
    fn test_malformed_rows_are_reported() {
        let err = crate::reconcile::decode_rows(
            Side::Left,
            &serde_json::json!([{"id": "1"}, {"id": "2", "nested": {"a": 1}}]),
        )
        .unwrap_err();

        assert_eq!(
            err,
            ReconcileError::malformed(
                Side::Left,
                RowError::NonScalarField {
                    row: 1,
                    field: "nested".into(),
                    found: "an object",
                }
            )
        );
    }

    #[test]
    fn test_numeric_fields_compare_numerically() {
        let left = rows(r#"[{"id":"1","amount":10}]"#);
        let right = rows(r#"[{"id":"1","amount":10.0}]"#);

        let result = reconcile(&left, &right, "id").unwrap();
        assert!(result.is_consistent());

        let right = rows(r#"[{"id":"1","amount":10.5}]"#);
        let result = reconcile(&left, &right, "id").unwrap();
        assert_eq!(result.differing.len(), 1);
        assert_eq!(result.differing[0].get("amount"), Some(&Value::Int(10)));
    }

    #[test]
    fn test_unsigned_keys_stay_distinct() {
        let left = rows(r#"[{"id":18446744073709551615,"v":"a"},{"id":18446744073709551614,"v":"b"}]"#);
        let right = rows(r#"[{"id":"18446744073709551614","v":"b"}]"#);

        let result = reconcile(&left, &right, "id").unwrap();

        assert_eq!(
            result.only_in_left,
            rows(r#"[{"id":18446744073709551615,"v":"a"}]"#)
        );
        assert!(result.differing.is_empty());
        assert_eq!(result.matched_pairs(), 1);
    }

    #[test]
    fn test_large_integer_fields_diverge() {
        let left = rows(r#"[{"id":"1","n":18446744073709551615},{"id":"2","n":9007199254740993}]"#);
        let right = rows(r#"[{"id":"1","n":18446744073709551614},{"id":"2","n":9007199254740992.0}]"#);

        let result = reconcile(&left, &right, "id").unwrap();

        assert_eq!(result.differing, left);
    }
}

use super::*;
use crate::error::BindError;
use crate::query;
use crate::value::Value;

#[test]
fn literal_only_template_has_no_values() {
    let q = query!("SELECT 1").unwrap();
    assert_eq!(q.sql(), "SELECT 1");
    assert!(q.values().is_empty());
}

#[test]
fn primitives_bind_in_left_to_right_order() {
    let q = query!(
        "SELECT * FROM users WHERE a = ", 1_i64,
        " AND b = ", "x",
        " AND c = ", true,
        ""
    )
    .unwrap();

    assert_eq!(
        q.sql(),
        "SELECT * FROM users WHERE a = $1 AND b = $2 AND c = $3"
    );
    assert_eq!(
        q.values(),
        &[
            Value::Int(1),
            Value::Text("x".to_string()),
            Value::Bool(true)
        ]
    );
}

#[test]
fn none_binds_as_null() {
    let q = query!("UPDATE users SET deleted_at = ", None::<i64>, "").unwrap();
    assert_eq!(q.sql(), "UPDATE users SET deleted_at = $1");
    assert_eq!(q.values(), &[Value::Null]);
}

#[test]
fn identifier_renders_quoted_and_unparameterized() {
    let q = query!("SELECT id FROM ", identifier(["public", "users"]), "").unwrap();
    assert_eq!(q.sql(), r#"SELECT id FROM "public"."users""#);
    assert!(q.values().is_empty());
}

#[test]
fn identifier_escapes_embedded_quotes() {
    let q = query!("SELECT id FROM ", identifier([r#"weird"name"#]), "").unwrap();
    assert_eq!(q.sql(), r#"SELECT id FROM "weird""name""#);
}

#[test]
fn empty_identifier_fails_validation() {
    let err = query!("SELECT id FROM ", identifier(Vec::<String>::new()), "").unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn raw_text_passes_through_verbatim() {
    let q = query!("SELECT created_at FROM events ", raw("ORDER BY 1 DESC"), "").unwrap();
    assert_eq!(q.sql(), "SELECT created_at FROM events ORDER BY 1 DESC");
    assert!(q.values().is_empty());
}

#[test]
fn raw_fixed_values_are_appended_in_order() {
    let q = query!("", raw_with("SELECT $1, $2", [10_i64, 20]), "").unwrap();
    assert_eq!(q.sql(), "SELECT $1, $2");
    assert_eq!(q.values(), &[Value::Int(10), Value::Int(20)]);
}

// Raw is the one fragment kind that bypasses renumbering: its
// placeholders keep the numbers the caller wrote, even after earlier
// dynamic parameters. Callers own the numbering in that case.
#[test]
fn raw_placeholders_are_not_renumbered() {
    let q = query!(
        "SELECT * FROM users WHERE a = ", 1_i64,
        " AND ", raw_with("b = $1", ["x"]),
        ""
    )
    .unwrap();

    assert_eq!(q.sql(), "SELECT * FROM users WHERE a = $1 AND b = $1");
    assert_eq!(q.values(), &[Value::Int(1), Value::Text("x".to_string())]);
}

#[test]
fn value_list_renders_bare_comma_joined_placeholders() {
    let q = query!(
        "SELECT * FROM users WHERE id IN (", value_list([1_i64, 2, 3]), ")"
    )
    .unwrap();

    assert_eq!(q.sql(), "SELECT * FROM users WHERE id IN ($1, $2, $3)");
    assert_eq!(
        q.values(),
        &[Value::Int(1), Value::Int(2), Value::Int(3)]
    );
}

#[test]
fn value_list_offsets_past_earlier_parameters() {
    let q = query!(
        "SELECT * FROM users WHERE status = ", "active",
        " AND id IN (", value_list([7_i64, 8]), ")"
    )
    .unwrap();

    assert_eq!(
        q.sql(),
        "SELECT * FROM users WHERE status = $1 AND id IN ($2, $3)"
    );
    assert_eq!(q.values().len(), 3);
}

#[test]
fn empty_value_list_fails_validation() {
    let err = query!("SELECT * WHERE id IN (", value_list(Vec::<i64>::new()), ")").unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn tuple_renders_parenthesized_group() {
    let q = query!(
        "SELECT * FROM t WHERE (a, b) = ", tuple([1_i64, 2]), ""
    )
    .unwrap();

    assert_eq!(q.sql(), "SELECT * FROM t WHERE (a, b) = ($1, $2)");
}

#[test]
fn empty_tuple_fails_validation() {
    let err = query!("VALUES ", tuple(Vec::<i64>::new()), "").unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn tuple_list_threads_the_offset_through_each_group() {
    let q = query!(
        "INSERT INTO t (a, b) VALUES ",
        tuple_list([vec![1_i64, 2], vec![3, 4], vec![5, 6]]),
        ""
    )
    .unwrap();

    assert_eq!(
        q.sql(),
        "INSERT INTO t (a, b) VALUES ($1, $2), ($3, $4), ($5, $6)"
    );
    assert_eq!(q.values().len(), 6);
}

#[test]
fn tuple_list_rejects_ragged_tuples_naming_both_lengths() {
    let err = query!(
        "INSERT INTO t VALUES ",
        tuple_list([vec![1_i64, 2], vec![3]]),
        ""
    )
    .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("expected 2 members"), "got: {message}");
    assert!(message.contains("has 1"), "got: {message}");
}

#[test]
fn unnest_transposes_rows_into_column_arrays() {
    let q = query!(
        "SELECT * FROM ",
        unnest([vec![1_i64, 2, 3], vec![4, 5, 6]], ["int4", "int4", "int4"]),
        ""
    )
    .unwrap();

    assert_eq!(
        q.sql(),
        r#"SELECT * FROM unnest($1::"int4"[], $2::"int4"[], $3::"int4"[])"#
    );
    assert_eq!(
        q.values(),
        &[
            Value::Array(vec![Value::Int(1), Value::Int(4)]),
            Value::Array(vec![Value::Int(2), Value::Int(5)]),
            Value::Array(vec![Value::Int(3), Value::Int(6)]),
        ]
    );
}

#[test]
fn unnest_offsets_past_earlier_parameters() {
    let q = query!(
        "INSERT INTO pairs (a, b) SELECT * FROM ",
        unnest([vec![1_i64, 2]], ["int8", "int8"]),
        " WHERE ", true,
        ""
    )
    .unwrap();

    assert_eq!(
        q.sql(),
        r#"INSERT INTO pairs (a, b) SELECT * FROM unnest($1::"int8"[], $2::"int8"[]) WHERE $3"#
    );
}

#[test]
fn unnest_with_no_rows_binds_empty_arrays() {
    let q = query!(
        "SELECT * FROM ",
        unnest(Vec::<Vec<i64>>::new(), ["int4", "text"]),
        ""
    )
    .unwrap();

    assert_eq!(
        q.sql(),
        r#"SELECT * FROM unnest($1::"int4"[], $2::"text"[])"#
    );
    assert_eq!(
        q.values(),
        &[Value::Array(vec![]), Value::Array(vec![])]
    );
}

#[test]
fn unnest_ragged_tuples_report_a_tuple_length_mismatch() {
    let err = query!(
        "SELECT * FROM ",
        unnest([vec![1_i64, 2], vec![3]], ["int4", "int4"]),
        ""
    )
    .unwrap_err();

    assert!(err.to_string().contains("Tuple lengths differ"));
}

#[test]
fn unnest_column_type_count_mismatch_is_a_distinct_error() {
    let err = query!(
        "SELECT * FROM ",
        unnest([vec![1_i64, 2]], ["int4"]),
        ""
    )
    .unwrap_err();

    assert!(err.to_string().contains("Column type count"));
}

#[test]
fn interleaved_array_is_an_unexpected_value_expression() {
    let err = query!(
        "SELECT ", Value::Array(vec![Value::Int(1)]), ""
    )
    .unwrap_err();

    match err {
        BindError::UnexpectedValue {
            constructed_sql, ..
        } => assert_eq!(constructed_sql, "SELECT "),
        other => panic!("expected UnexpectedValue, got {other:?}"),
    }
}

#[test]
fn nested_query_placeholders_are_shifted_past_outer_parameters() {
    let filter = query!("group_id = ", 7_i64, " AND role = ", "admin", "").unwrap();
    let q = query!(
        "SELECT * FROM users WHERE tenant_id = ", 1_i64,
        " AND ", filter,
        ""
    )
    .unwrap();

    assert_eq!(
        q.sql(),
        "SELECT * FROM users WHERE tenant_id = $1 AND group_id = $2 AND role = $3"
    );
    assert_eq!(
        q.values(),
        &[
            Value::Int(1),
            Value::Int(7),
            Value::Text("admin".to_string())
        ]
    );
}

#[test]
fn nested_query_at_offset_zero_is_unchanged() {
    let inner = query!("id = ", 42_i64, "").unwrap();
    let q = query!("SELECT * FROM users WHERE ", inner, "").unwrap();

    assert_eq!(q.sql(), "SELECT * FROM users WHERE id = $1");
    assert_eq!(q.values(), &[Value::Int(42)]);
}

#[test]
fn mixed_tokens_keep_placeholders_contiguous() {
    let q = query!(
        "SELECT * FROM ", identifier(["users"]),
        " WHERE a = ", 1_i64,
        " AND b IN (", value_list([2_i64, 3]), ") AND (c, d) = ", tuple([4_i64, 5]),
        ""
    )
    .unwrap();

    assert_eq!(
        q.sql(),
        r#"SELECT * FROM "users" WHERE a = $1 AND b IN ($2, $3) AND (c, d) = ($4, $5)"#
    );
    assert_eq!(q.values().len(), 5);

    // Placeholders are contiguous from $1 to $n.
    for i in 1..=q.values().len() {
        assert!(q.sql().contains(&format!("${i}")), "missing ${i}");
    }
}

#[test]
fn template_rejects_mismatched_segment_and_argument_counts() {
    let err = template(&["a", "b", "c"], vec![Token::from(1_i64)]).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn composed_query_exposes_driver_param_refs() {
    let q = query!("SELECT ", 1_i64, " + ", 2_i64, "").unwrap();
    assert_eq!(q.params_ref().len(), 2);
}

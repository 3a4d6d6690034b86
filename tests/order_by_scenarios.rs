//! Ordered-Stream Scenario Tests
//!
//! End-to-end checks of the ordered-stream operator:
//! - Single-key ordering for ints, strings and timestamps
//! - Multi-key lexicographic ordering with mixed directions
//! - Schema violations abort with no stream
//! - Sorting a sorted stream is idempotent

use chrono::{Duration, Utc};
use flexquery::executor::{
    are_streams_equal, create_ordered_stream, ExecutorError, InMemoryStream, OrderField,
};
use flexquery::record::Record;
use flexquery::value::{Value, ValueKind};

// =============================================================================
// Helper Functions
// =============================================================================

fn record<V: Into<Value>>(names: &[&str], values: Vec<V>) -> Record {
    Record::normalized(names.iter().copied(), values).unwrap()
}

fn stream(records: Vec<Record>) -> InMemoryStream {
    InMemoryStream::new(records)
}

fn assert_ordered_as(fields: &[OrderField], input: Vec<Record>, expected: Vec<Record>) {
    let mut ordered = create_ordered_stream(fields, stream(input)).unwrap();
    let mut want = stream(expected);
    assert!(
        are_streams_equal(&mut want, &mut ordered).unwrap(),
        "streams don't match"
    );
}

// =============================================================================
// Single-Key Ordering
// =============================================================================

/// One int column ascending.
#[test]
fn test_one_column_int_ascending() {
    let names = ["id", "age"];
    assert_ordered_as(
        &[OrderField::asc("age")],
        vec![
            record(&names, vec![1, 7]),
            record(&names, vec![2, 10]),
            record(&names, vec![3, 2]),
        ],
        vec![
            record(&names, vec![3, 2]),
            record(&names, vec![1, 7]),
            record(&names, vec![2, 10]),
        ],
    );
}

/// One string column descending.
#[test]
fn test_one_column_string_descending() {
    let names = ["name", "age"];
    let row = |name: &str, age: i64| record(&names, vec![Value::from(name), Value::from(age)]);

    assert_ordered_as(
        &[OrderField::desc("name")],
        vec![row("b", 7), row("c", 10), row("a", 2)],
        vec![row("c", 10), row("b", 7), row("a", 2)],
    );
}

/// One timestamp column descending.
#[test]
fn test_one_column_time_descending() {
    let now = Utc::now();
    let names = ["name", "birth"];
    let row = |name: &str, birth| record(&names, vec![Value::from(name), Value::Time(birth)]);

    assert_ordered_as(
        &[OrderField::desc("birth")],
        vec![
            row("b", now),
            row("c", now + Duration::hours(1)),
            row("a", now - Duration::hours(1)),
        ],
        vec![
            row("c", now + Duration::hours(1)),
            row("b", now),
            row("a", now - Duration::hours(1)),
        ],
    );
}

/// Bool column ascending: false before true, ties stable.
#[test]
fn test_one_column_bool_ascending() {
    let names = ["id", "active"];
    let row = |id: i64, active: bool| record(&names, vec![Value::from(id), Value::from(active)]);

    assert_ordered_as(
        &[OrderField::asc("active")],
        vec![row(1, true), row(2, false), row(3, true), row(4, false)],
        vec![row(2, false), row(4, false), row(1, true), row(3, true)],
    );
}

// =============================================================================
// Multi-Key Ordering
// =============================================================================

/// String ascending then int descending.
#[test]
fn test_string_ascending_then_int_descending() {
    let names = ["name", "age"];
    let row = |name: &str, age: i64| record(&names, vec![Value::from(name), Value::from(age)]);

    assert_ordered_as(
        &[OrderField::asc("name"), OrderField::desc("age")],
        vec![row("a", 7), row("d", 19), row("a", -2), row("c", 1), row("d", 17)],
        vec![row("a", 7), row("a", -2), row("c", 1), row("d", 19), row("d", 17)],
    );
}

/// Records equal on every key keep upstream order.
#[test]
fn test_order_equivalent_records_are_stable() {
    let names = ["group", "seq"];
    let row = |group: &str, seq: i64| record(&names, vec![Value::from(group), Value::from(seq)]);

    assert_ordered_as(
        &[OrderField::desc("group")],
        vec![row("x", 1), row("y", 2), row("x", 3), row("y", 4), row("x", 5)],
        vec![row("y", 2), row("y", 4), row("x", 1), row("x", 3), row("x", 5)],
    );
}

/// Records with extra, unrelated fields are tolerated.
#[test]
fn test_schema_drift_outside_sort_keys() {
    let a = record(&["id", "age"], vec![1, 30]);
    let b = record(&["age", "nickname"], vec![Value::from(20), Value::from("bo")]);

    assert_ordered_as(&[OrderField::asc("age")], vec![a.clone(), b.clone()], vec![b, a]);
}

// =============================================================================
// Failure Scenarios
// =============================================================================

/// A record lacking the sort field fails the whole operation.
#[test]
fn test_missing_field_fails() {
    let input = vec![
        record(&["name", "age"], vec![Value::from("a"), Value::from(7)]),
        record(&["name"], vec!["d"]),
    ];

    let err = create_ordered_stream(&[OrderField::desc("age")], stream(input)).unwrap_err();
    match err {
        ExecutorError::FieldNotFound { field } => assert_eq!(field.as_str(), "age"),
        other => panic!("expected FieldNotFound, got {:?}", other),
    }
}

/// Int in one record and float in another for the same key.
#[test]
fn test_int_float_mismatch_fails() {
    let input = vec![
        record(&["name", "age"], vec![Value::from("a"), Value::from(7)]),
        record(&["name", "age"], vec![Value::from("d"), Value::from(19.5)]),
    ];

    let err = create_ordered_stream(&[OrderField::desc("age")], stream(input)).unwrap_err();
    match err {
        ExecutorError::TypeMismatch { field, left, right } => {
            assert_eq!(field.as_str(), "age");
            assert_eq!(left, ValueKind::Int);
            assert_eq!(right, ValueKind::Float);
        }
        other => panic!("expected TypeMismatch, got {:?}", other),
    }
}

/// Null in a sort key is a type violation.
#[test]
fn test_null_sort_key_fails() {
    let input = vec![
        record(&["age"], vec![Value::from(1)]),
        record(&["age"], vec![Value::Null]),
    ];

    let err = create_ordered_stream(&[OrderField::asc("age")], stream(input)).unwrap_err();
    assert_eq!(err.code(), "FQ_TYPE_MISMATCH");
}

// =============================================================================
// Idempotence
// =============================================================================

/// Sorting an already sorted stream yields an equal stream.
#[test]
fn test_sort_is_idempotent() {
    let names = ["name", "age"];
    let row = |name: &str, age: i64| record(&names, vec![Value::from(name), Value::from(age)]);
    let fields = [OrderField::asc("name"), OrderField::desc("age")];
    let input = vec![row("b", 1), row("a", 5), row("b", 9), row("a", 2)];

    let mut once = create_ordered_stream(&fields, stream(input.clone())).unwrap();
    let mut twice = create_ordered_stream(
        &fields,
        create_ordered_stream(&fields, stream(input)).unwrap(),
    )
    .unwrap();

    assert!(are_streams_equal(&mut once, &mut twice).unwrap());
}

//! Ordered-stream operator
//!
//! Sorts an upstream stream by a list of `(field, direction)` keys.
//!
//! The operator is blocking: any record may sort before any other, so the
//! whole upstream is drained before the first record is emitted.
//!
//! # Execution (strict order)
//!
//! 1. Drain upstream into a buffer, then close upstream
//! 2. Resolve every sort key against every record (`FieldNotFound`)
//! 3. Check each key column holds exactly one non-null kind (`TypeMismatch`)
//! 4. Stable multi-key sort; the first unequal key decides
//! 5. Hand the buffer to a new in-memory stream
//!
//! Any failure aborts the whole operation and returns no stream.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::observability::{log_event, Event, ObservationScope};
use crate::record::{FieldName, Record};
use crate::value::{compare, Value, ValueKind};

use super::errors::{ExecutorError, ExecutorResult};
use super::stream::{drain, InMemoryStream, RecordStream};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    /// Suffix accepted by the `name:dir` key syntax
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        }
    }

    /// Applies this direction to a natural-order comparison
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

/// One sort key: a field name and a direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderField {
    pub name: FieldName,
    pub direction: Direction,
}

impl OrderField {
    /// Creates a sort key on `name`
    pub fn new(name: impl Into<FieldName>, direction: Direction) -> Self {
        Self {
            name: name.into(),
            direction,
        }
    }

    /// Ascending key on `name`
    pub fn asc(name: impl Into<FieldName>) -> Self {
        Self::new(name, Direction::Ascending)
    }

    /// Descending key on `name`
    pub fn desc(name: impl Into<FieldName>) -> Self {
        Self::new(name, Direction::Descending)
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.direction.as_str())
    }
}

/// Malformed `field[:direction]` text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid order field '{0}' (expected <field>[:asc|desc])")]
pub struct ParseOrderFieldError(pub String);

impl FromStr for OrderField {
    type Err = ParseOrderFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, direction) = match s.rsplit_once(':') {
            Some((name, dir)) => {
                let direction = match dir.to_ascii_lowercase().as_str() {
                    "asc" | "ascending" => Direction::Ascending,
                    "desc" | "descending" => Direction::Descending,
                    _ => return Err(ParseOrderFieldError(s.to_string())),
                };
                (name, direction)
            }
            None => (s, Direction::Ascending),
        };

        if name.is_empty() {
            return Err(ParseOrderFieldError(s.to_string()));
        }
        Ok(Self::new(name, direction))
    }
}

/// Sorts `upstream` by `fields` with no bound on the buffered records.
pub fn create_ordered_stream<S: RecordStream>(
    fields: &[OrderField],
    upstream: S,
) -> ExecutorResult<InMemoryStream> {
    create_ordered_stream_bounded(fields, upstream, None)
}

/// Sorts `upstream` by `fields`.
///
/// Takes ownership of `upstream` and closes it on every path once draining
/// ends. Upstream pull errors are returned unchanged. With
/// `max_buffered_records` set, buffering more records fails with
/// `ExecutionLimit`.
pub fn create_ordered_stream_bounded<S: RecordStream>(
    fields: &[OrderField],
    mut upstream: S,
    max_buffered_records: Option<usize>,
) -> ExecutorResult<InMemoryStream> {
    let keys = fields.len().to_string();
    let scope = ObservationScope::begin("ORDER_BY", &[("keys", keys.as_str())]);

    let drained = drain(&mut upstream, max_buffered_records);
    let closed = upstream.close();

    let result = match (drained, closed) {
        (Ok(records), Ok(())) => sort_records(fields, records),
        (Ok(_), Err(close_err)) => Err(close_err),
        (Err(e), close) => {
            if let Err(close_err) = close {
                let reason = close_err.to_string();
                log_event(
                    Event::UpstreamCloseFailed,
                    &[("code", close_err.code()), ("reason", reason.as_str())],
                );
            }
            Err(e)
        }
    };

    match result {
        Ok(sorted) => {
            let count = sorted.len().to_string();
            scope.complete(&[("records", count.as_str())]);
            Ok(InMemoryStream::new(sorted))
        }
        Err(e) => {
            scope.fail(e.code(), &e.to_string());
            Err(e)
        }
    }
}

/// Resolved sort key values of one record, in `OrderField` order
struct SortKey<'r> {
    values: Vec<&'r Value>,
}

impl<'r> SortKey<'r> {
    fn resolve(fields: &[OrderField], record: &'r Record) -> ExecutorResult<Self> {
        let values = fields
            .iter()
            .map(|field| {
                record
                    .get(field.name.as_str())
                    .ok_or_else(|| ExecutorError::FieldNotFound {
                        field: field.name.clone(),
                    })
            })
            .collect::<ExecutorResult<Vec<_>>>()?;
        Ok(Self { values })
    }
}

fn sort_records(fields: &[OrderField], records: Vec<Record>) -> ExecutorResult<Vec<Record>> {
    let order = {
        let keys = records
            .iter()
            .map(|record| SortKey::resolve(fields, record))
            .collect::<ExecutorResult<Vec<_>>>()?;

        check_column_kinds(fields, &keys)?;

        let mut failure = None;
        let mut order: Vec<usize> = (0..records.len()).collect();
        // sort_by is stable: equivalent records keep upstream order
        order.sort_by(|&a, &b| match compare_keys(fields, &keys[a], &keys[b]) {
            Ok(ordering) => ordering,
            Err(e) => {
                failure.get_or_insert(e);
                Ordering::Equal
            }
        });

        if let Some(e) = failure {
            return Err(e);
        }
        order
    };

    let mut slots: Vec<Option<Record>> = records.into_iter().map(Some).collect();
    Ok(order
        .into_iter()
        .filter_map(|position| slots[position].take())
        .collect())
}

/// Every key column must hold a single non-null kind.
fn check_column_kinds(fields: &[OrderField], keys: &[SortKey<'_>]) -> ExecutorResult<()> {
    for (column, field) in fields.iter().enumerate() {
        let mut expected: Option<ValueKind> = None;

        for key in keys {
            let kind = key.values[column].kind();
            let left = expected.unwrap_or(kind);

            if kind == ValueKind::Null || left != kind {
                return Err(ExecutorError::TypeMismatch {
                    field: field.name.clone(),
                    left,
                    right: kind,
                });
            }
            expected = Some(kind);
        }
    }
    Ok(())
}

fn compare_keys(
    fields: &[OrderField],
    a: &SortKey<'_>,
    b: &SortKey<'_>,
) -> ExecutorResult<Ordering> {
    for (i, field) in fields.iter().enumerate() {
        let ordering = compare(a.values[i], b.values[i])
            .map_err(|mismatch| ExecutorError::type_mismatch(&field.name, mismatch))?;

        if ordering != Ordering::Equal {
            return Ok(field.direction.apply(ordering));
        }
    }
    Ok(Ordering::Equal)
}

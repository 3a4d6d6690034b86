//! Same-kind value comparison
//!
//! Ordering rules:
//! - Int: numeric
//! - Float: IEEE total order (`NaN` sorts deterministically)
//! - String: lexicographic byte order
//! - Bool: `false < true`
//! - Time: chronological
//! - Differing kinds, or any `Null`: error

use std::cmp::Ordering;

use super::{Value, ValueKind};

/// Two values of incompatible kinds were compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot compare {left} with {right}")]
pub struct KindMismatch {
    pub left: ValueKind,
    pub right: ValueKind,
}

/// Compares two values of the same kind.
pub fn compare(a: &Value, b: &Value) -> Result<Ordering, KindMismatch> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok(x.cmp(y)),
        (Value::Float(x), Value::Float(y)) => Ok(x.total_cmp(y)),
        (Value::String(x), Value::String(y)) => Ok(x.as_bytes().cmp(y.as_bytes())),
        (Value::Bool(x), Value::Bool(y)) => Ok(x.cmp(y)),
        (Value::Time(x), Value::Time(y)) => Ok(x.cmp(y)),
        _ => Err(KindMismatch {
            left: a.kind(),
            right: b.kind(),
        }),
    }
}

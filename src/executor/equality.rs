//! Stream equality checking
//!
//! Verification utility for operators; not part of the production pull path.

use super::errors::ExecutorResult;
use super::stream::RecordStream;

/// Compares two streams record by record.
///
/// Returns `Ok(false)` when one stream ends before the other or a pair of
/// records differs structurally (names, order, kinds, payloads). Pull errors
/// from either side are returned as errors. Neither stream is closed.
pub fn are_streams_equal<L, R>(left: &mut L, right: &mut R) -> ExecutorResult<bool>
where
    L: RecordStream + ?Sized,
    R: RecordStream + ?Sized,
{
    loop {
        let l = left.pull()?;
        let r = right.pull()?;

        match (l, r) {
            (None, None) => return Ok(true),
            (Some(a), Some(b)) => {
                if a != b {
                    return Ok(false);
                }
            }
            _ => return Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::errors::ExecutorError;
    use crate::executor::stream::{InMemoryStream, SourceStream};
    use crate::record::Record;
    use crate::value::Value;

    fn rec(name: &str, age: Value) -> Record {
        Record::normalized(["name", "age"], [Value::from(name), age]).unwrap()
    }

    #[test]
    fn test_equal_streams() {
        let mut a = InMemoryStream::new(vec![rec("a", 1.into()), rec("b", 2.into())]);
        let mut b = InMemoryStream::new(vec![rec("a", 1.into()), rec("b", 2.into())]);
        assert!(are_streams_equal(&mut a, &mut b).unwrap());
    }

    #[test]
    fn test_empty_streams_are_equal() {
        let mut a = InMemoryStream::new(Vec::new());
        let mut b = InMemoryStream::new(Vec::new());
        assert!(are_streams_equal(&mut a, &mut b).unwrap());
    }

    #[test]
    fn test_length_mismatch_is_not_an_error() {
        let mut a = InMemoryStream::new(vec![rec("a", 1.into())]);
        let mut b = InMemoryStream::new(vec![rec("a", 1.into()), rec("b", 2.into())]);
        assert!(!are_streams_equal(&mut a, &mut b).unwrap());

        let mut a = InMemoryStream::new(vec![rec("a", 1.into()), rec("b", 2.into())]);
        let mut b = InMemoryStream::new(vec![rec("a", 1.into())]);
        assert!(!are_streams_equal(&mut a, &mut b).unwrap());
    }

    #[test]
    fn test_no_cross_kind_numeric_equality() {
        let mut a = InMemoryStream::new(vec![rec("a", Value::Int(7))]);
        let mut b = InMemoryStream::new(vec![rec("a", Value::Float(7.0))]);
        assert!(!are_streams_equal(&mut a, &mut b).unwrap());
    }

    #[test]
    fn test_field_order_matters() {
        let mut a = InMemoryStream::new(vec![Record::normalized(["x", "y"], [1, 2]).unwrap()]);
        let mut b = InMemoryStream::new(vec![Record::normalized(["y", "x"], [2, 1]).unwrap()]);
        assert!(!are_streams_equal(&mut a, &mut b).unwrap());
    }

    #[test]
    fn test_pull_error_propagates() {
        let mut a = InMemoryStream::new(vec![rec("a", 1.into())]);
        let items: Vec<ExecutorResult<Record>> = vec![Err(ExecutorError::upstream("boom"))];
        let mut b = SourceStream::new(items.into_iter());

        let err = are_streams_equal(&mut a, &mut b).unwrap_err();
        assert_eq!(err.code(), "FQ_UPSTREAM_FAILED");
    }
}

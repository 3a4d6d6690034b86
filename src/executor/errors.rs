//! Executor error types
//!
//! Error codes:
//! - FQ_FIELD_NOT_FOUND (ERROR)
//! - FQ_TYPE_MISMATCH (ERROR)
//! - FQ_UPSTREAM_FAILED (ERROR)
//! - FQ_INVALID_RECORD (ERROR)
//! - FQ_EXECUTION_LIMIT (ERROR)
//! - FQ_STREAM_CLOSED (FATAL)
//! - FQ_STREAM_TERMINATED (FATAL)
//!
//! The two FATAL codes signal a broken stream protocol (a pull after close
//! or after a terminal error) rather than bad data.

use std::error::Error as StdError;

use thiserror::Error;

use crate::observability::Severity;
use crate::record::{FieldName, RecordError};
use crate::value::{KindMismatch, ValueKind};

/// Opaque error raised by a data source
pub type SourceError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors surfaced by streams and operators
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// A sort key is absent from a record
    #[error("field '{field}' not found in record")]
    FieldNotFound { field: FieldName },

    /// A sort key column holds incompatible kinds
    #[error("type mismatch on field '{field}': cannot compare {left} with {right}")]
    TypeMismatch {
        field: FieldName,
        left: ValueKind,
        right: ValueKind,
    },

    /// Opaque upstream failure, passed through untouched
    #[error("upstream failed: {0}")]
    Upstream(#[source] SourceError),

    /// A source produced an invalid record
    #[error("invalid record: {0}")]
    InvalidRecord(#[from] RecordError),

    /// A materializing operator exceeded its buffer bound
    #[error("execution limit exceeded: more than {limit} records buffered")]
    ExecutionLimit { limit: usize },

    #[error("stream pulled after close")]
    StreamClosed,

    #[error("stream pulled after a terminal error")]
    StreamTerminated,
}

impl ExecutorError {
    /// Wraps a data-source error
    pub fn upstream(source: impl Into<SourceError>) -> Self {
        ExecutorError::Upstream(source.into())
    }

    /// Lifts a value-level mismatch to a field-level error
    pub fn type_mismatch(field: &FieldName, mismatch: KindMismatch) -> Self {
        ExecutorError::TypeMismatch {
            field: field.clone(),
            left: mismatch.left,
            right: mismatch.right,
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ExecutorError::FieldNotFound { .. } => "FQ_FIELD_NOT_FOUND",
            ExecutorError::TypeMismatch { .. } => "FQ_TYPE_MISMATCH",
            ExecutorError::Upstream(_) => "FQ_UPSTREAM_FAILED",
            ExecutorError::InvalidRecord(_) => "FQ_INVALID_RECORD",
            ExecutorError::ExecutionLimit { .. } => "FQ_EXECUTION_LIMIT",
            ExecutorError::StreamClosed => "FQ_STREAM_CLOSED",
            ExecutorError::StreamTerminated => "FQ_STREAM_TERMINATED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            ExecutorError::StreamClosed | ExecutorError::StreamTerminated => Severity::Fatal,
            _ => Severity::Error,
        }
    }

    /// Returns whether this error is a schema violation in the data
    pub fn is_schema_violation(&self) -> bool {
        matches!(
            self,
            ExecutorError::FieldNotFound { .. } | ExecutorError::TypeMismatch { .. }
        )
    }
}

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_codes() {
        let err = ExecutorError::FieldNotFound { field: "age".into() };
        assert_eq!(err.code(), "FQ_FIELD_NOT_FOUND");
        assert_eq!(ExecutorError::StreamClosed.code(), "FQ_STREAM_CLOSED");
        assert_eq!(
            ExecutorError::ExecutionLimit { limit: 1 }.code(),
            "FQ_EXECUTION_LIMIT"
        );
    }

    #[test]
    fn test_type_mismatch_names_field_and_kinds() {
        let mismatch = KindMismatch {
            left: ValueKind::Int,
            right: ValueKind::Float,
        };
        let err = ExecutorError::type_mismatch(&"age".into(), mismatch);
        assert_eq!(
            err.to_string(),
            "type mismatch on field 'age': cannot compare int with float"
        );
        assert!(err.is_schema_violation());
    }

    #[test]
    fn test_upstream_keeps_source() {
        let err = ExecutorError::upstream(io::Error::new(io::ErrorKind::Other, "socket reset"));
        assert_eq!(err.code(), "FQ_UPSTREAM_FAILED");
        assert!(err.source().is_some());
        assert!(err.to_string().contains("socket reset"));
        assert!(!err.is_schema_violation());
    }

    #[test]
    fn test_protocol_errors_are_fatal() {
        assert_eq!(ExecutorError::StreamClosed.severity(), Severity::Fatal);
        assert_eq!(ExecutorError::StreamTerminated.severity(), Severity::Fatal);
        assert_eq!(
            ExecutorError::FieldNotFound { field: "x".into() }.severity(),
            Severity::Error
        );
    }

    #[test]
    fn test_record_error_converts() {
        let err: ExecutorError = RecordError::DuplicateField("id".into()).into();
        assert_eq!(err.code(), "FQ_INVALID_RECORD");
    }
}

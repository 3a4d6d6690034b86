//! Query execution subsystem for flexquery
//!
//! Operators exchange records through single-reader, pull-based streams.
//!
//! # Components
//!
//! - `stream`: the `RecordStream` contract plus in-memory and source adapters
//! - `order`: the blocking ordered-stream operator
//! - `equality`: structural stream comparison for verification
//! - `node`: reusable operator-tree nodes
//!
//! # Invariants
//!
//! - Deterministic output order for a given input
//! - All-or-nothing: a failed operator returns no stream
//! - Every stream an operator takes ownership of is closed on every path

mod equality;
mod errors;
mod node;
mod order;
mod stream;

pub use equality::are_streams_equal;
pub use errors::{ExecutorError, ExecutorResult, SourceError};
pub use node::{InMemorySource, Node, OrderBy};
pub use order::{
    create_ordered_stream, create_ordered_stream_bounded, Direction, OrderField,
    ParseOrderFieldError,
};
pub use stream::{drain, InMemoryStream, RecordStream, SourceStream};

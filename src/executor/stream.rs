//! Pull-based record streams
//!
//! A stream is consumed by a single reader through `pull`:
//! - `Ok(Some(record))`: next record
//! - `Ok(None)`: end of stream; repeated pulls keep returning it
//! - `Err(e)`: terminal failure
//!
//! `close` releases held resources. It is idempotent and must be reached on
//! every exit path, including after errors.

use crate::record::Record;

use super::errors::{ExecutorError, ExecutorResult};

/// A single-reader pull iterator over records
pub trait RecordStream {
    /// Pulls the next record, `None` at end of stream
    fn pull(&mut self) -> ExecutorResult<Option<Record>>;

    /// Releases resources held by the stream
    fn close(&mut self) -> ExecutorResult<()>;
}

impl<S: RecordStream + ?Sized> RecordStream for Box<S> {
    fn pull(&mut self) -> ExecutorResult<Option<Record>> {
        (**self).pull()
    }

    fn close(&mut self) -> ExecutorResult<()> {
        (**self).close()
    }
}

impl<S: RecordStream + ?Sized> RecordStream for &mut S {
    fn pull(&mut self) -> ExecutorResult<Option<Record>> {
        (**self).pull()
    }

    fn close(&mut self) -> ExecutorResult<()> {
        (**self).close()
    }
}

/// Pulls `stream` to its end.
///
/// With `limit` set, fails with `ExecutionLimit` as soon as more than
/// `limit` records have been pulled. The stream is not closed.
pub fn drain<S: RecordStream + ?Sized>(
    stream: &mut S,
    limit: Option<usize>,
) -> ExecutorResult<Vec<Record>> {
    let mut records = Vec::new();
    while let Some(record) = stream.pull()? {
        if let Some(limit) = limit {
            if records.len() >= limit {
                return Err(ExecutorError::ExecutionLimit { limit });
            }
        }
        records.push(record);
    }
    Ok(records)
}

/// Stream over a fixed, in-memory sequence of records
#[derive(Debug)]
pub struct InMemoryStream {
    records: std::vec::IntoIter<Record>,
    closed: bool,
}

impl InMemoryStream {
    /// Creates an open stream that yields `records` in order
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: records.into_iter(),
            closed: false,
        }
    }

    /// Number of records not yet pulled
    pub fn remaining(&self) -> usize {
        self.records.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl RecordStream for InMemoryStream {
    fn pull(&mut self) -> ExecutorResult<Option<Record>> {
        if self.closed {
            return Err(ExecutorError::StreamClosed);
        }
        Ok(self.records.next())
    }

    fn close(&mut self) -> ExecutorResult<()> {
        if !self.closed {
            self.closed = true;
            self.records = Vec::new().into_iter();
        }
        Ok(())
    }
}

impl From<Vec<Record>> for InMemoryStream {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceState {
    Open,
    Exhausted,
    Failed,
    Closed,
}

/// Adapts a fallible record iterator (a data-source connector) into a stream.
///
/// The first error is returned as-is and latches the stream: every later
/// pull fails with `StreamTerminated`. After end of stream the iterator is
/// never polled again.
pub struct SourceStream<I> {
    source: Option<I>,
    state: SourceState,
}

impl<I> SourceStream<I>
where
    I: Iterator<Item = ExecutorResult<Record>>,
{
    /// Wraps `source`; the stream stays open until `close`
    pub fn new(source: I) -> Self {
        Self {
            source: Some(source),
            state: SourceState::Open,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.state == SourceState::Closed
    }
}

impl<I> RecordStream for SourceStream<I>
where
    I: Iterator<Item = ExecutorResult<Record>>,
{
    fn pull(&mut self) -> ExecutorResult<Option<Record>> {
        match self.state {
            SourceState::Closed => return Err(ExecutorError::StreamClosed),
            SourceState::Failed => return Err(ExecutorError::StreamTerminated),
            SourceState::Exhausted => return Ok(None),
            SourceState::Open => {}
        }

        match self.source.as_mut().and_then(Iterator::next) {
            Some(Ok(record)) => Ok(Some(record)),
            Some(Err(e)) => {
                self.state = SourceState::Failed;
                Err(e)
            }
            None => {
                self.state = SourceState::Exhausted;
                Ok(None)
            }
        }
    }

    fn close(&mut self) -> ExecutorResult<()> {
        // Dropping the iterator releases whatever the connector holds
        self.source = None;
        self.state = SourceState::Closed;
        Ok(())
    }
}

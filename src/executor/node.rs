//! Execution nodes
//!
//! A node is a reusable description of one operator in a tree. Each call to
//! `get` builds a fresh stream, so a tree can be executed repeatedly.

use std::sync::Arc;

use crate::observability::{log_event, log_event_at, Event, MetricsRegistry};
use crate::record::Record;

use super::errors::{ExecutorError, ExecutorResult};
use super::order::{create_ordered_stream_bounded, OrderField};
use super::stream::{InMemoryStream, RecordStream};

/// An operator that can produce a record stream
pub trait Node {
    fn get(&self) -> ExecutorResult<Box<dyn RecordStream>>;
}

/// Leaf node over a fixed set of records
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Vec<Record>,
}

impl InMemorySource {
    /// Each `get` streams a fresh copy of `records`
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Number of records the source yields
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Node for InMemorySource {
    fn get(&self) -> ExecutorResult<Box<dyn RecordStream>> {
        Ok(Box::new(InMemoryStream::new(self.records.clone())))
    }
}

/// Sorts the output of its source node
pub struct OrderBy {
    fields: Vec<OrderField>,
    source: Box<dyn Node>,
    max_buffered_records: Option<usize>,
    metrics: Option<Arc<MetricsRegistry>>,
}

impl OrderBy {
    /// Orders `source` by `fields`, with no buffer limit and no metrics
    pub fn new(fields: Vec<OrderField>, source: Box<dyn Node>) -> Self {
        Self {
            fields,
            source,
            max_buffered_records: None,
            metrics: None,
        }
    }

    /// Bounds the number of records the sort may buffer
    pub fn with_max_buffered_records(mut self, limit: Option<usize>) -> Self {
        self.max_buffered_records = limit;
        self
    }

    /// Counts executions and rejections in `metrics`
    pub fn with_metrics(mut self, metrics: Arc<MetricsRegistry>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn fields(&self) -> &[OrderField] {
        &self.fields
    }
}

impl Node for OrderBy {
    fn get(&self) -> ExecutorResult<Box<dyn RecordStream>> {
        let upstream = self.source.get()?;

        match create_ordered_stream_bounded(&self.fields, upstream, self.max_buffered_records) {
            Ok(stream) => {
                let records = stream.remaining().to_string();
                log_event(Event::OrderByExecuted, &[("records", records.as_str())]);
                if let Some(metrics) = &self.metrics {
                    metrics.record_order_executed(stream.remaining());
                }
                Ok(Box::new(stream))
            }
            Err(e) => {
                log_event_at(e.severity(), Event::OrderByRejected, &[("code", e.code())]);
                if let Some(metrics) = &self.metrics {
                    if matches!(e, ExecutorError::Upstream(_)) {
                        metrics.increment_upstream_failures();
                    }
                    metrics.increment_orders_rejected();
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::stream::drain;
    use crate::value::Value;

    fn source(ages: &[i64]) -> InMemorySource {
        InMemorySource::new(
            ages.iter()
                .map(|age| Record::normalized(["age"], [*age]).unwrap())
                .collect(),
        )
    }

    fn ages(stream: &mut Box<dyn RecordStream>) -> Vec<i64> {
        drain(stream, None)
            .unwrap()
            .iter()
            .map(|r| r.get("age").and_then(Value::as_int).unwrap())
            .collect()
    }

    #[test]
    fn test_in_memory_source_is_repeatable() {
        let node = source(&[3, 1]);
        assert_eq!(ages(&mut node.get().unwrap()), vec![3, 1]);
        assert_eq!(ages(&mut node.get().unwrap()), vec![3, 1]);
    }

    #[test]
    fn test_order_by_node() {
        let metrics = Arc::new(MetricsRegistry::new());
        let node = OrderBy::new(vec![OrderField::desc("age")], Box::new(source(&[3, 1, 2])))
            .with_metrics(Arc::clone(&metrics));

        assert_eq!(ages(&mut node.get().unwrap()), vec![3, 2, 1]);
        assert_eq!(metrics.snapshot().orders_executed, 1);
        assert_eq!(metrics.snapshot().records_sorted, 3);
    }

    #[test]
    fn test_nested_order_by() {
        let inner = OrderBy::new(vec![OrderField::desc("age")], Box::new(source(&[3, 1, 2])));
        let outer = OrderBy::new(vec![OrderField::asc("age")], Box::new(inner));
        assert_eq!(ages(&mut outer.get().unwrap()), vec![1, 2, 3]);
    }

    #[test]
    fn test_order_by_rejection_counted() {
        let metrics = Arc::new(MetricsRegistry::new());
        let node = OrderBy::new(vec![OrderField::asc("missing")], Box::new(source(&[1])))
            .with_metrics(Arc::clone(&metrics));

        assert!(node.get().is_err());
        assert_eq!(metrics.snapshot().orders_rejected, 1);
        assert_eq!(metrics.snapshot().upstream_failures, 0);
    }

    #[test]
    fn test_order_by_limit() {
        let node = OrderBy::new(vec![OrderField::asc("age")], Box::new(source(&[1, 2, 3])))
            .with_max_buffered_records(Some(2));
        assert!(matches!(node.get(), Err(ExecutorError::ExecutionLimit { limit: 2 })));
    }
}

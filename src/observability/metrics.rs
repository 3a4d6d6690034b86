//! Execution counters
//!
//! - Counters only, monotonic
//! - Relaxed atomics; a registry may be shared across operator trees

use std::sync::atomic::{AtomicU64, Ordering};

/// Registry of execution counters
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Ordered streams produced
    orders_executed: AtomicU64,
    /// Ordering requests rejected (schema, type, limit or upstream failure)
    orders_rejected: AtomicU64,
    /// Records emitted in sorted order
    records_sorted: AtomicU64,
    /// Upstream pull failures observed by operators
    upstream_failures: AtomicU64,
}

impl MetricsRegistry {
    /// Creates a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one successful sort of `records` records
    pub fn record_order_executed(&self, records: usize) {
        self.orders_executed.fetch_add(1, Ordering::Relaxed);
        self.records_sorted
            .fetch_add(records as u64, Ordering::Relaxed);
    }

    /// Counts one rejected sort
    pub fn increment_orders_rejected(&self) {
        self.orders_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts one sort rejected by an upstream failure
    pub fn increment_upstream_failures(&self) {
        self.upstream_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current snapshot of all metrics as JSON
    pub fn to_json(&self) -> String {
        let s = self.snapshot();
        format!(
            r#"{{"orders_executed":{},"orders_rejected":{},"records_sorted":{},"upstream_failures":{}}}"#,
            s.orders_executed, s.orders_rejected, s.records_sorted, s.upstream_failures,
        )
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            orders_executed: self.orders_executed.load(Ordering::Relaxed),
            orders_rejected: self.orders_rejected.load(Ordering::Relaxed),
            records_sorted: self.records_sorted.load(Ordering::Relaxed),
            upstream_failures: self.upstream_failures.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub orders_executed: u64,
    pub orders_rejected: u64,
    pub records_sorted: u64,
    pub upstream_failures: u64,
}

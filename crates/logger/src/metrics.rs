//! Logger metrics for observability

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use serde::Serialize;

/// Metrics for a running logger
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Writer tasks currently in flight
    in_flight: AtomicUsize,
    /// Messages taken from the intake channel and dispatched
    dispatched_count: AtomicU64,
    /// Total successful writes
    write_count: AtomicU64,
    /// Total write failures (sink errors, short writes, panicked writers)
    failure_count: AtomicU64,
    /// Failure reports dropped because the failure channel was full
    dropped_reports: AtomicU64,
}

impl LoggerMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer tasks currently in flight
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }

    pub(crate) fn inc_in_flight(&self) {
        self.in_flight.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn dec_in_flight(&self) {
        self.in_flight.fetch_sub(1, Ordering::Relaxed);
    }

    /// Total messages dispatched to writer tasks
    pub fn dispatched_count(&self) -> u64 {
        self.dispatched_count.load(Ordering::Relaxed)
    }

    pub(crate) fn inc_dispatched_count(&self) {
        self.dispatched_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Total successful writes
    pub fn write_count(&self) -> u64 {
        self.write_count.load(Ordering::Relaxed)
    }

    pub(crate) fn inc_write_count(&self) {
        self.write_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Total write failures
    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    pub(crate) fn inc_failure_count(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Failure reports dropped due to a full failure channel
    pub fn dropped_reports(&self) -> u64 {
        self.dropped_reports.load(Ordering::Relaxed)
    }

    pub(crate) fn inc_dropped_reports(&self) {
        self.dropped_reports.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            in_flight: self.in_flight(),
            dispatched_count: self.dispatched_count(),
            write_count: self.write_count(),
            failure_count: self.failure_count(),
            dropped_reports: self.dropped_reports(),
        }
    }
}

/// Snapshot of logger metrics (for reporting)
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricsSnapshot {
    pub in_flight: usize,
    pub dispatched_count: u64,
    pub write_count: u64,
    pub failure_count: u64,
    pub dropped_reports: u64,
}

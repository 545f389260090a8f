//! Observability and Metrics
//!
//! Metrics collection for monitoring protocol activity: how many frames
//! went out, how many datagrams came in, and how many of those were
//! rejected or filtered.
//!
//! Uses atomic counters for thread-safe collection.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::info;

/// Metrics collector for protocol operations
#[derive(Debug)]
pub struct Metrics {
    /// Total send attempts
    pub sends_total: AtomicU64,
    /// Send attempts that did not put the full frame on the wire
    pub sends_failed: AtomicU64,
    /// Total bytes sent
    pub bytes_sent: AtomicU64,
    /// Datagrams successfully decoded into packets
    pub packets_decoded: AtomicU64,
    /// Datagrams rejected by the frame decoder
    pub decode_errors: AtomicU64,
    /// Packets suppressed as duplicates
    pub duplicates_filtered: AtomicU64,
    /// Start time for uptime calculation
    start_time: Instant,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            sends_total: AtomicU64::new(0),
            sends_failed: AtomicU64::new(0),
            bytes_sent: AtomicU64::new(0),
            packets_decoded: AtomicU64::new(0),
            decode_errors: AtomicU64::new(0),
            duplicates_filtered: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a send attempt
    pub fn record_send(&self, bytes: u64, complete: bool) {
        self.sends_total.fetch_add(1, Ordering::Relaxed);
        self.bytes_sent.fetch_add(bytes, Ordering::Relaxed);
        if !complete {
            self.sends_failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a successfully decoded packet
    pub fn record_decoded(&self) {
        self.packets_decoded.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a datagram the decoder rejected
    pub fn record_decode_error(&self) {
        self.decode_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a duplicate packet suppressed by the filter
    pub fn record_filtered(&self) {
        self.duplicates_filtered.fetch_add(1, Ordering::Relaxed);
    }

    /// Seconds since this collector was created
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Take a point-in-time snapshot of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            sends_total: self.sends_total.load(Ordering::Relaxed),
            sends_failed: self.sends_failed.load(Ordering::Relaxed),
            bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
            packets_decoded: self.packets_decoded.load(Ordering::Relaxed),
            decode_errors: self.decode_errors.load(Ordering::Relaxed),
            duplicates_filtered: self.duplicates_filtered.load(Ordering::Relaxed),
            uptime_secs: self.uptime_secs(),
        }
    }

    /// Log a summary of all counters at info level
    pub fn log_summary(&self) {
        let s = self.snapshot();
        info!(
            sends_total = s.sends_total,
            sends_failed = s.sends_failed,
            bytes_sent = s.bytes_sent,
            packets_decoded = s.packets_decoded,
            decode_errors = s.decode_errors,
            duplicates_filtered = s.duplicates_filtered,
            uptime_secs = s.uptime_secs,
            "protocol metrics"
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of the counters
#[derive(Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    pub sends_total: u64,
    pub sends_failed: u64,
    pub bytes_sent: u64,
    pub packets_decoded: u64,
    pub decode_errors: u64,
    pub duplicates_filtered: u64,
    pub uptime_secs: u64,
}

/// Process-wide metrics collector shared by all senders and receivers
pub fn global() -> &'static Metrics {
    static METRICS: OnceLock<Metrics> = OnceLock::new();
    METRICS.get_or_init(Metrics::new)
}

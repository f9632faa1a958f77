//! Logger metrics for observability
//!
//! Counts what happened to committed events: written, suppressed by the
//! level gate or a missing writer, or failed in the writer.

use std::sync::atomic::{AtomicU64, Ordering};

/// Commit counters of one logger.
///
/// # Example
///
/// ```
/// use rust_event_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_written();
/// metrics.record_failed();
///
/// assert_eq!(metrics.written(), 1);
/// assert_eq!(metrics.failed(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Events handed to a writer that reported success
    written: AtomicU64,

    /// Events dropped by the level gate or for lack of a writer
    suppressed: AtomicU64,

    /// Events whose writer returned an error
    failed: AtomicU64,

    /// Fatal/Panic events that requested termination
    terminations: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            written: AtomicU64::new(0),
            suppressed: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            terminations: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn written(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn suppressed(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn terminations(&self) -> u64 {
        self.terminations.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.suppressed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_termination(&self) -> u64 {
        self.terminations.fetch_add(1, Ordering::Relaxed)
    }

    /// Failure rate over all writer attempts as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing reached a writer yet.
    pub fn failure_rate(&self) -> f64 {
        let written = self.written();
        let failed = self.failed();
        let attempts = written + failed;
        if attempts == 0 {
            return 0.0;
        }
        (failed as f64 / attempts as f64) * 100.0
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.written.store(0, Ordering::Relaxed);
        self.suppressed.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
        self.terminations.store(0, Ordering::Relaxed);
    }
}

//! Pipeline counters for observability
//!
//! Atomic counters tracking pool usage and dispatch outcomes. These back
//! the testable "a suppressed call acquires nothing and writes nothing"
//! property and give operators a cheap health signal.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Entries handed out by the pool (fresh or recycled)
    entries_acquired: AtomicU64,
    /// Entries freshly allocated because the pool was empty
    entries_created: AtomicU64,
    /// Entries reused from the pool
    entries_recycled: AtomicU64,
    /// Released entries dropped because the pool was full
    entries_discarded: AtomicU64,
    /// Fan-outs where every matching appender accepted the line
    lines_written: AtomicU64,
    /// Individual appender write failures
    write_failures: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            entries_acquired: AtomicU64::new(0),
            entries_created: AtomicU64::new(0),
            entries_recycled: AtomicU64::new(0),
            entries_discarded: AtomicU64::new(0),
            lines_written: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn entries_acquired(&self) -> u64 {
        self.entries_acquired.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn entries_created(&self) -> u64 {
        self.entries_created.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn entries_recycled(&self) -> u64 {
        self.entries_recycled.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn entries_discarded(&self) -> u64 {
        self.entries_discarded.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn lines_written(&self) -> u64 {
        self.lines_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_acquired(&self, fresh: bool) {
        self.entries_acquired.fetch_add(1, Ordering::Relaxed);
        if fresh {
            self.entries_created.fetch_add(1, Ordering::Relaxed);
        } else {
            self.entries_recycled.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline]
    pub fn record_discarded(&self) {
        self.entries_discarded.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_written(&self) {
        self.lines_written.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_write_failures(&self, count: u64) {
        self.write_failures.fetch_add(count, Ordering::Relaxed);
    }
}

//! Typed concurrent entry pool
//!
//! A bounded free-list of [`LogEntry`] values backed by a channel, so
//! acquire and release are individually thread-safe without an external
//! lock. Ownership of an entry transfers wholesale: the pool hands out
//! values, never references, so exactly one caller can hold an entry
//! between acquire and release.
//!
//! The pool trims itself by construction: releasing into a full pool
//! silently drops the entry.

use super::log_entry::LogEntry;
use super::metrics::LoggerMetrics;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::Arc;

const POOL_CAPACITY: usize = 64;

pub struct EntryPool {
    slots: Sender<LogEntry>,
    idle: Receiver<LogEntry>,
    metrics: Arc<LoggerMetrics>,
}

impl EntryPool {
    pub fn new(metrics: Arc<LoggerMetrics>) -> Self {
        let (slots, idle) = bounded(POOL_CAPACITY);
        Self {
            slots,
            idle,
            metrics,
        }
    }

    /// Take an idle entry, or allocate when the pool is empty. The entry's
    /// per-call state is cleared; its fields survive only when
    /// `reuse_fields` is set.
    pub fn acquire(&self, reuse_fields: bool) -> LogEntry {
        match self.idle.try_recv() {
            Ok(mut entry) => {
                entry.reset(reuse_fields);
                self.metrics.record_acquired(false);
                entry
            }
            Err(_) => {
                self.metrics.record_acquired(true);
                LogEntry::default()
            }
        }
    }

    /// Return an entry for future reuse. A full pool drops it.
    pub fn release(&self, entry: LogEntry) {
        if self.slots.try_send(entry).is_err() {
            self.metrics.record_discarded();
        }
    }
}

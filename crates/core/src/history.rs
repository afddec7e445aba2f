//! Append-only log of committed actions
//!
//! Written by the system only when a mutation commits; denials and
//! rolled-back attempts leave no trace. Nothing in the allocation
//! algorithm reads it back; it exists for audit and observability.

use avert_types::{HistoryAction, HistoryEntry};
use chrono::Utc;

#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a committed action
    pub(crate) fn record(&mut self, action: HistoryAction) {
        let seq = u64::try_from(self.entries.len()).unwrap_or(u64::MAX);
        self.entries.push(HistoryEntry {
            seq,
            timestamp: Utc::now(),
            action,
        });
    }

    /// Drop entries recorded past a previous length
    ///
    /// Used by what-if exploration to erase the trace of its probe.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    /// All committed entries, oldest first
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

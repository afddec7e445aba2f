//! What-if exploration
//!
//! Runs a real request against the live system, then restores the
//! pre-call snapshot on every exit path, so the net observable effect
//! is nil: state, history, everything.

use std::collections::BTreeMap;

use avert_errors::Result;
use avert_types::{Pid, WhatIfReport};
use tracing::debug;

use crate::system::AllocationSystem;

impl AllocationSystem {
    /// Explore what a request would do without committing it
    ///
    /// Delegates to [`AllocationSystem::request`] behind a snapshot and
    /// unconditionally restores the snapshot afterwards, including the
    /// history trace of a would-be grant.
    ///
    /// # Errors
    ///
    /// `UnknownResource` if the request names a resource outside the
    /// fixed set; the state is restored before the error propagates.
    pub fn explore(&mut self, pid: Pid, request: &BTreeMap<String, u64>) -> Result<WhatIfReport> {
        if !self.registry.contains(pid) {
            return Ok(WhatIfReport {
                feasible: false,
                message: format!("process {pid} not found"),
                safe_sequence: Vec::new(),
            });
        }

        let snapshot = self.save();
        let history_len = self.history.len();

        let outcome = self.request(pid, request);
        let safe_sequence = match &outcome {
            Ok(status) if status.is_granted() => self.safe_sequence(),
            _ => Vec::new(),
        };

        self.restore(snapshot);
        self.history.truncate(history_len);

        let status = outcome?;
        debug!(pid, feasible = status.is_granted(), "what-if explored");
        Ok(WhatIfReport {
            feasible: status.is_granted(),
            message: status.message(),
            safe_sequence,
        })
    }
}

//! Committed-action history entries
//!
//! The history is an append-only audit record written only when a
//! mutation commits. No algorithm consults it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Pid;

/// A committed mutating action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum HistoryAction {
    /// A granted and committed resource request
    Allocate {
        pid: Pid,
        request: BTreeMap<String, u64>,
    },
    /// A full release of a process's allocation
    Release {
        pid: Pid,
        released: BTreeMap<String, u64>,
    },
}

impl HistoryAction {
    /// Process the action applied to
    #[must_use]
    pub fn pid(&self) -> Pid {
        match self {
            Self::Allocate { pid, .. } | Self::Release { pid, .. } => *pid,
        }
    }
}

/// One record in the append-only history log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Position in the log, starting at zero
    pub seq: u64,
    /// Commit time
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub action: HistoryAction,
}

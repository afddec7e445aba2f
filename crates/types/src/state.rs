//! Serializable report shapes produced by the core's query API
//!
//! Maps are `BTreeMap` throughout so JSON output is deterministic.

use std::collections::BTreeMap;
use std::fmt;

use avert_errors::DenialReason;
use serde::{Deserialize, Serialize};

use crate::Pid;

/// Outcome of the safety check: whether a safe completion order exists,
/// and the witness sequence proving it
///
/// The witness is built by a first-fit scan in ascending process id
/// order, so it is deterministic for a given state. It is meaningful
/// only when `safe` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyVerdict {
    pub safe: bool,
    pub sequence: Vec<Pid>,
}

impl SafetyVerdict {
    /// Verdict for a state where every process can complete
    #[must_use]
    pub fn safe(sequence: Vec<Pid>) -> Self {
        Self {
            safe: true,
            sequence,
        }
    }

    /// Verdict for a state with no safe completion order
    #[must_use]
    pub fn unsafe_state() -> Self {
        Self {
            safe: false,
            sequence: Vec::new(),
        }
    }
}

/// Outcome of a resource request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RequestStatus {
    Granted,
    Denied { reason: DenialReason },
}

impl RequestStatus {
    #[must_use]
    pub fn denied(reason: DenialReason) -> Self {
        Self::Denied { reason }
    }

    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Human-readable outcome message
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Granted => "request granted - system remains safe".to_string(),
            Self::Denied { reason } => reason.to_string(),
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Granted => write!(f, "GRANTED"),
            Self::Denied { .. } => write!(f, "DENIED"),
        }
    }
}

/// Result of a what-if exploration; the live system is untouched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatIfReport {
    /// Whether the request would have been granted
    pub feasible: bool,
    /// Outcome message from the simulated request
    pub message: String,
    /// Witness completion order after the simulated grant, empty if the
    /// request would have been denied
    pub safe_sequence: Vec<Pid>,
}

/// Per-process view in a [`SystemState`] report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessState {
    pub max_claim: BTreeMap<String, u64>,
    pub allocated: BTreeMap<String, u64>,
    pub need: BTreeMap<String, u64>,
}

/// Full observable system state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemState {
    pub total: BTreeMap<String, u64>,
    pub available: BTreeMap<String, u64>,
    pub processes: BTreeMap<Pid, ProcessState>,
    pub is_safe: bool,
    pub safe_sequence: Vec<Pid>,
}

//! Per-request impact analysis
//!
//! Breaks a prospective request into its individual validation checks,
//! using what-if exploration for the safety question so the live
//! system is never changed.

use std::collections::BTreeMap;

use avert_core::AllocationSystem;
use avert_errors::Result;
use avert_types::Pid;
use serde::{Deserialize, Serialize};

/// Individual validation results for a prospective request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestChecks {
    pub exceeds_need: bool,
    pub exceeds_available: bool,
    pub would_be_safe: bool,
}

/// Full impact analysis of a prospective request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestAnalysis {
    pub valid: bool,
    pub pid: Pid,
    pub request: BTreeMap<String, u64>,
    pub checks: Option<RequestChecks>,
    pub safe_sequence: Vec<Pid>,
    pub reason: Option<String>,
}

/// Analyze a request without committing it
///
/// # Errors
///
/// `UnknownResource` if the request names a resource outside the
/// system's fixed set.
pub fn analyze_request(
    system: &mut AllocationSystem,
    pid: Pid,
    request: &BTreeMap<String, u64>,
) -> Result<RequestAnalysis> {
    let state = system.state();
    let Some(process) = state.processes.get(&pid) else {
        return Ok(RequestAnalysis {
            valid: false,
            pid,
            request: request.clone(),
            checks: None,
            safe_sequence: Vec::new(),
            reason: Some(format!("process {pid} not found")),
        });
    };

    let exceeds_need = request
        .iter()
        .any(|(resource, amount)| *amount > process.need.get(resource).copied().unwrap_or(0));
    let exceeds_available = request
        .iter()
        .any(|(resource, amount)| *amount > state.available.get(resource).copied().unwrap_or(0));

    let report = system.explore(pid, request)?;

    Ok(RequestAnalysis {
        valid: true,
        pid,
        request: request.clone(),
        checks: Some(RequestChecks {
            exceeds_need,
            exceeds_available,
            would_be_safe: report.feasible,
        }),
        safe_sequence: report.safe_sequence,
        reason: (!report.feasible).then_some(report.message),
    })
}

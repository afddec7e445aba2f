//! Allocation controller
//!
//! [`AllocationSystem`] owns the full mutable state: the fixed resource
//! set and total pool, the available pool, the process registry, and
//! the committed-action history. Every mutating operation either
//! commits fully or leaves the state exactly as it was.

use std::collections::BTreeMap;

use avert_errors::{DenialReason, Result};
use avert_types::{
    HistoryAction, HistoryEntry, Pid, ProcessState, RequestStatus, ResourceSet, ResourceVector,
    SafetyVerdict, SystemState,
};
use tracing::{debug, info};

use crate::history::HistoryLog;
use crate::registry::ProcessRegistry;
use crate::safety::safety_check;

/// The deadlock-avoidance allocation state machine
///
/// Single-writer: callers serialize access (see the crate docs).
#[derive(Debug, Clone)]
pub struct AllocationSystem {
    pub(crate) resources: ResourceSet,
    pub(crate) total: ResourceVector,
    pub(crate) available: ResourceVector,
    pub(crate) registry: ProcessRegistry,
    pub(crate) history: HistoryLog,
}

impl AllocationSystem {
    /// Create a system with a fixed resource-type set and total pool
    ///
    /// The resource set is the map's key set; component order is the
    /// map's sorted key order. Everything starts available.
    #[must_use]
    pub fn new(total: &BTreeMap<String, u64>) -> Self {
        let resources = ResourceSet::new(total.keys().cloned().collect());
        let values = resources
            .names()
            .iter()
            .map(|name| total.get(name).copied().unwrap_or(0))
            .collect();
        let total_vec = ResourceVector::from_values(values);
        let available = total_vec.clone();
        info!(resources = resources.len(), "allocation system created");
        Self {
            resources,
            total: total_vec,
            available,
            registry: ProcessRegistry::new(),
            history: HistoryLog::new(),
        }
    }

    /// Register a new process with a declared maximum claim
    ///
    /// The claim is deliberately not validated against the total pool:
    /// a process may declare more than the system holds, in which case
    /// the safety check treats it as never finishable.
    ///
    /// # Errors
    ///
    /// `DuplicateProcess` if the id is taken, `UnknownResource` if the
    /// claim names a resource outside the fixed set.
    pub fn add_process(&mut self, pid: Pid, max_claim: &BTreeMap<String, u64>) -> Result<()> {
        let claim = ResourceVector::from_map(&self.resources, max_claim)?;
        self.registry.add(pid, claim)?;
        info!(pid, "process added");
        Ok(())
    }

    /// Remove a process, returning its entire allocation to the pool
    ///
    /// Returns the released amounts.
    ///
    /// # Errors
    ///
    /// `ProcessNotFound` if the id is absent.
    pub fn remove_process(&mut self, pid: Pid) -> Result<BTreeMap<String, u64>> {
        let process = self.registry.remove(pid)?;
        let released = process.allocated().clone();
        self.available.add_assign(&released);
        info!(pid, released = %released, "process removed");
        Ok(released.to_map(&self.resources))
    }

    /// Handle a resource request with the Banker's Algorithm
    ///
    /// Validation order, cheapest first: the process must exist, the
    /// request must fit its remaining need, then the available pool.
    /// Only then is the request applied tentatively and the safety
    /// check run; an unsafe result rolls the state back to a snapshot
    /// taken before the tentative mutation. The system is observable
    /// only in its pre-request or fully committed post-request state.
    ///
    /// # Errors
    ///
    /// `UnknownResource` if the request names a resource outside the
    /// fixed set. Denials are not errors; they come back as
    /// [`RequestStatus::Denied`].
    pub fn request(
        &mut self,
        pid: Pid,
        request: &BTreeMap<String, u64>,
    ) -> Result<RequestStatus> {
        let request_vec = ResourceVector::from_map(&self.resources, request)?;

        let Some(process) = self.registry.get(pid) else {
            debug!(pid, "request denied: process not found");
            return Ok(RequestStatus::denied(DenialReason::ProcessNotFound { pid }));
        };

        if let Some(idx) = request_vec.first_excess(process.need()) {
            let resource = self.resources.name(idx).to_string();
            debug!(pid, resource, "request denied: exceeds need");
            return Ok(RequestStatus::denied(DenialReason::ExceedsNeed { resource }));
        }

        if let Some(idx) = request_vec.first_excess(&self.available) {
            let resource = self.resources.name(idx).to_string();
            debug!(pid, resource, "request denied: exceeds available");
            return Ok(RequestStatus::denied(DenialReason::ExceedsAvailable {
                resource,
            }));
        }

        // Tentative allocation against a snapshot of the mutable state.
        let snapshot = self.save();
        self.available = self.available.saturating_sub(&request_vec);
        if let Some(process) = self.registry.get_mut(pid) {
            process.grant(&request_vec);
        }

        let verdict = safety_check(&self.available, &self.registry);
        if verdict.safe {
            info!(pid, request = %request_vec, "request granted");
            self.history.record(HistoryAction::Allocate {
                pid,
                request: request_vec.to_map(&self.resources),
            });
            Ok(RequestStatus::Granted)
        } else {
            self.restore(snapshot);
            info!(pid, request = %request_vec, "request denied: would lead to unsafe state");
            Ok(RequestStatus::denied(DenialReason::UnsafeState))
        }
    }

    /// Release every resource a process holds
    ///
    /// Unconditional: freeing resources only relaxes constraints, so no
    /// safety check runs. Returns `false` if the process does not exist.
    pub fn release(&mut self, pid: Pid) -> bool {
        let Some(process) = self.registry.get_mut(pid) else {
            debug!(pid, "release ignored: process not found");
            return false;
        };
        let released = process.drain_allocation();
        self.available.add_assign(&released);
        info!(pid, released = %released, "resources released");
        self.history.record(HistoryAction::Release {
            pid,
            released: released.to_map(&self.resources),
        });
        true
    }

    /// Whether the current state has a safe completion order
    #[must_use]
    pub fn is_safe(&self) -> bool {
        self.safety().safe
    }

    /// Witness completion order, empty if the state is unsafe
    #[must_use]
    pub fn safe_sequence(&self) -> Vec<Pid> {
        self.safety().sequence
    }

    /// Full safety verdict for the current state
    #[must_use]
    pub fn safety(&self) -> SafetyVerdict {
        safety_check(&self.available, &self.registry)
    }

    /// Full observable state as a serializable report
    #[must_use]
    pub fn state(&self) -> SystemState {
        let verdict = self.safety();
        let processes = self
            .registry
            .iter()
            .map(|p| {
                (
                    p.pid(),
                    ProcessState {
                        max_claim: p.max_claim().to_map(&self.resources),
                        allocated: p.allocated().to_map(&self.resources),
                        need: p.need().to_map(&self.resources),
                    },
                )
            })
            .collect();
        SystemState {
            total: self.total.to_map(&self.resources),
            available: self.available.to_map(&self.resources),
            processes,
            is_safe: verdict.safe,
            safe_sequence: verdict.sequence,
        }
    }

    /// Committed allocate/release actions, oldest first
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    /// The fixed resource-type set
    #[must_use]
    pub fn resources(&self) -> &ResourceSet {
        &self.resources
    }

    /// The live process registry
    #[must_use]
    pub fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    /// Currently unallocated resources
    #[must_use]
    pub fn available(&self) -> &ResourceVector {
        &self.available
    }

    /// Fixed total pool
    #[must_use]
    pub fn total(&self) -> &ResourceVector {
        &self.total
    }
}

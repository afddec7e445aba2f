//! Live-process registry
//!
//! Keyed by process id over a `BTreeMap`, so iteration is always in
//! ascending pid order. That ordering is the canonical scan order for
//! the safety check's witness sequence.

use std::collections::BTreeMap;

use avert_errors::AllocationError;
use avert_types::{Pid, ResourceVector};

use crate::process::Process;

/// Owns the set of live processes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessRegistry {
    processes: BTreeMap<Pid, Process>,
}

impl ProcessRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new process with a zero allocation
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::DuplicateProcess`] if the id is taken.
    pub fn add(&mut self, pid: Pid, max_claim: ResourceVector) -> Result<(), AllocationError> {
        if self.processes.contains_key(&pid) {
            return Err(AllocationError::DuplicateProcess { pid });
        }
        self.processes.insert(pid, Process::new(pid, max_claim));
        Ok(())
    }

    /// Remove a process, returning it so the caller can fold its
    /// allocation back into the available pool
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::ProcessNotFound`] if the id is absent.
    pub fn remove(&mut self, pid: Pid) -> Result<Process, AllocationError> {
        self.processes
            .remove(&pid)
            .ok_or(AllocationError::ProcessNotFound { pid })
    }

    #[must_use]
    pub fn get(&self, pid: Pid) -> Option<&Process> {
        self.processes.get(&pid)
    }

    pub(crate) fn get_mut(&mut self, pid: Pid) -> Option<&mut Process> {
        self.processes.get_mut(&pid)
    }

    #[must_use]
    pub fn contains(&self, pid: Pid) -> bool {
        self.processes.contains_key(&pid)
    }

    /// All live processes in ascending pid order
    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

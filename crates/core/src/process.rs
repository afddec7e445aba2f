//! Process bookkeeping
//!
//! A process declares its maximum claim once at creation. The `need`
//! vector is derived (`max_claim - allocated`) and recomputed on every
//! allocation change, so it is always consistent with `allocated`.

use avert_types::{Pid, ResourceVector};

/// One competing actor in the allocation system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pid: Pid,
    max_claim: ResourceVector,
    allocated: ResourceVector,
    need: ResourceVector,
}

impl Process {
    /// Create a process holding nothing; `need` starts equal to the claim
    #[must_use]
    pub(crate) fn new(pid: Pid, max_claim: ResourceVector) -> Self {
        let allocated = ResourceVector::zeros(max_claim.len());
        let need = max_claim.clone();
        Self {
            pid,
            max_claim,
            allocated,
            need,
        }
    }

    #[must_use]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[must_use]
    pub fn max_claim(&self) -> &ResourceVector {
        &self.max_claim
    }

    #[must_use]
    pub fn allocated(&self) -> &ResourceVector {
        &self.allocated
    }

    #[must_use]
    pub fn need(&self) -> &ResourceVector {
        &self.need
    }

    /// Whether the process could run to completion given `work`
    #[must_use]
    pub fn can_finish(&self, work: &ResourceVector) -> bool {
        self.need.fits_within(work)
    }

    /// Fold a granted request into the allocation
    ///
    /// Callers must have validated `request <= need`; the derived `need`
    /// is recomputed afterwards.
    pub(crate) fn grant(&mut self, request: &ResourceVector) {
        self.allocated.add_assign(request);
        self.recompute_need();
    }

    /// Zero the allocation and return what was held
    pub(crate) fn drain_allocation(&mut self) -> ResourceVector {
        let released = self.allocated.drain();
        self.recompute_need();
        released
    }

    fn recompute_need(&mut self) {
        self.need = self.max_claim.saturating_sub(&self.allocated);
    }
}

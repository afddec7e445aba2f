//! Value-typed state snapshots
//!
//! A snapshot is a fully independent copy of the mutable state (the
//! available pool plus every process's vectors). Mutating the live
//! system after taking one does not affect it, and restoring replaces
//! the live state wholesale. This is what makes request evaluation
//! atomic: commit keeps the mutation, rollback restores the snapshot.

use avert_types::ResourceVector;

use crate::registry::ProcessRegistry;
use crate::system::AllocationSystem;

/// Deep copy of the full mutable system state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    pub(crate) available: ResourceVector,
    pub(crate) registry: ProcessRegistry,
}

impl AllocationSystem {
    /// Capture the current mutable state
    #[must_use]
    pub fn save(&self) -> StateSnapshot {
        StateSnapshot {
            available: self.available.clone(),
            registry: self.registry.clone(),
        }
    }

    /// Replace the live state with a previously captured snapshot
    pub fn restore(&mut self, snapshot: StateSnapshot) {
        self.available = snapshot.available;
        self.registry = snapshot.registry;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::system::AllocationSystem;

    fn map(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
        pairs
            .iter()
            .map(|(name, amount)| ((*name).to_string(), *amount))
            .collect()
    }

    #[test]
    fn snapshot_is_independent_of_live_state() {
        let mut system = AllocationSystem::new(&map(&[("CPU", 10), ("Memory", 20)]));
        system.add_process(0, &map(&[("CPU", 5), ("Memory", 10)])).unwrap();

        let snapshot = system.save();
        let before = system.state();

        system.request(0, &map(&[("CPU", 2), ("Memory", 3)])).unwrap();
        assert_ne!(system.state(), before);

        system.restore(snapshot);
        assert_eq!(system.state(), before);
    }
}

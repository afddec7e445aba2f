//! Banker's Algorithm safety check
//!
//! Pure function over the current allocation state; it never mutates
//! anything and repeated calls on the same state return the same
//! verdict and the same witness sequence.

use std::collections::BTreeSet;

use avert_types::{Pid, ResourceVector, SafetyVerdict};

use crate::registry::ProcessRegistry;

/// Simulate whether every process can eventually complete
///
/// Starting from the available pool, repeatedly pick the first
/// unfinished process (ascending pid) whose remaining need fits in the
/// working pool, let it finish, and reclaim its allocation. The state
/// is safe iff the simulation finishes every process; the returned
/// sequence is the witness completion order.
///
/// Worst case `O(n^2 * m)` for `n` processes and `m` resource types,
/// since each of up to `n` completions rescans the registry.
#[must_use]
pub fn safety_check(available: &ResourceVector, registry: &ProcessRegistry) -> SafetyVerdict {
    let mut work = available.clone();
    let mut finished: BTreeSet<Pid> = BTreeSet::new();
    let mut sequence: Vec<Pid> = Vec::with_capacity(registry.len());

    loop {
        let next = registry
            .iter()
            .find(|p| !finished.contains(&p.pid()) && p.can_finish(&work));

        match next {
            Some(p) => {
                work.add_assign(p.allocated());
                finished.insert(p.pid());
                sequence.push(p.pid());
            }
            None => break,
        }
    }

    if finished.len() == registry.len() {
        SafetyVerdict::safe(sequence)
    } else {
        SafetyVerdict::unsafe_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avert_types::ResourceSet;
    use std::collections::BTreeMap;

    fn set() -> ResourceSet {
        ResourceSet::new(vec!["CPU".to_string(), "Memory".to_string()])
    }

    fn vector(cpu: u64, mem: u64) -> ResourceVector {
        let map = BTreeMap::from([("CPU".to_string(), cpu), ("Memory".to_string(), mem)]);
        ResourceVector::from_map(&set(), &map).unwrap()
    }

    #[test]
    fn empty_registry_is_trivially_safe() {
        let verdict = safety_check(&vector(10, 20), &ProcessRegistry::new());
        assert!(verdict.safe);
        assert!(verdict.sequence.is_empty());
    }

    #[test]
    fn witness_order_is_ascending_first_fit() {
        let mut registry = ProcessRegistry::new();
        registry.add(2, vector(3, 5)).unwrap();
        registry.add(0, vector(5, 10)).unwrap();

        let verdict = safety_check(&vector(10, 20), &registry);
        assert!(verdict.safe);
        assert_eq!(verdict.sequence, vec![0, 2]);
    }

    #[test]
    fn unfillable_claim_makes_state_unsafe() {
        let mut registry = ProcessRegistry::new();
        registry.add(0, vector(15, 0)).unwrap();

        let verdict = safety_check(&vector(10, 20), &registry);
        assert!(!verdict.safe);
        assert!(verdict.sequence.is_empty());
    }

    #[test]
    fn reclaimed_allocations_unblock_later_processes() {
        // P1 can only finish after P0 completes and releases its holdings.
        let mut registry = ProcessRegistry::new();
        registry.add(0, vector(4, 0)).unwrap();
        registry.add(1, vector(6, 0)).unwrap();
        registry
            .get_mut(0)
            .unwrap()
            .grant(&vector(3, 0));
        registry
            .get_mut(1)
            .unwrap()
            .grant(&vector(5, 0));

        // available = 10 - 3 - 5 = 2: P0 needs 1, P1 needs 1.
        let verdict = safety_check(&vector(2, 0), &registry);
        assert!(verdict.safe);
        assert_eq!(verdict.sequence, vec![0, 1]);
    }

    #[test]
    fn verdict_is_deterministic() {
        let mut registry = ProcessRegistry::new();
        registry.add(0, vector(5, 10)).unwrap();
        registry.add(1, vector(3, 5)).unwrap();

        let available = vector(10, 20);
        let first = safety_check(&available, &registry);
        let second = safety_check(&available, &registry);
        assert_eq!(first, second);
    }
}

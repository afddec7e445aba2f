//! Property tests for the allocation core
//!
//! Drives random operation sequences through the system and checks the
//! structural invariants that must hold after every committed step.

use std::collections::BTreeMap;

use avert_core::AllocationSystem;
use avert_types::SystemState;
use proptest::prelude::*;

const RESOURCES: [&str; 3] = ["CPU", "Disk", "Memory"];

#[derive(Debug, Clone)]
enum Op {
    Add { pid: u32, claim: [u64; 3] },
    Request { pid: u32, amounts: [u64; 3] },
    Release { pid: u32 },
    Remove { pid: u32 },
    Explore { pid: u32, amounts: [u64; 3] },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let pid = 0u32..6;
    let amounts = [0u64..8, 0u64..8, 0u64..8];
    prop_oneof![
        (pid.clone(), amounts.clone()).prop_map(|(pid, claim)| Op::Add { pid, claim }),
        (pid.clone(), amounts.clone()).prop_map(|(pid, amounts)| Op::Request { pid, amounts }),
        pid.clone().prop_map(|pid| Op::Release { pid }),
        pid.clone().prop_map(|pid| Op::Remove { pid }),
        (pid, amounts).prop_map(|(pid, amounts)| Op::Explore { pid, amounts }),
    ]
}

fn map(amounts: [u64; 3]) -> BTreeMap<String, u64> {
    RESOURCES
        .iter()
        .zip(amounts)
        .map(|(name, amount)| ((*name).to_string(), amount))
        .collect()
}

fn check_invariants(state: &SystemState) {
    for resource in state.total.keys() {
        let allocated: u64 = state
            .processes
            .values()
            .map(|p| p.allocated[resource])
            .sum();
        assert_eq!(
            state.available[resource] + allocated,
            state.total[resource],
            "conservation violated for {resource}"
        );
    }
    for (pid, process) in &state.processes {
        for resource in state.total.keys() {
            assert_eq!(
                process.need[resource],
                process.max_claim[resource] - process.allocated[resource],
                "need derivation violated for process {pid}, {resource}"
            );
            assert!(
                process.allocated[resource] <= process.max_claim[resource],
                "allocation above max claim for process {pid}, {resource}"
            );
        }
    }
}

proptest! {
    #[test]
    fn invariants_hold_under_random_operations(ops in proptest::collection::vec(op_strategy(), 1..40)) {
        let mut system = AllocationSystem::new(&map([10, 12, 20]));

        for op in ops {
            match op {
                Op::Add { pid, claim } => {
                    // Duplicate ids are a legitimate recoverable error.
                    let _ = system.add_process(pid, &map(claim));
                }
                Op::Request { pid, amounts } => {
                    let before = system.state();
                    let status = system.request(pid, &map(amounts)).unwrap();
                    if !status.is_granted() {
                        prop_assert_eq!(system.state(), before);
                    }
                }
                Op::Release { pid } => {
                    let _ = system.release(pid);
                }
                Op::Remove { pid } => {
                    let _ = system.remove_process(pid);
                }
                Op::Explore { pid, amounts } => {
                    let before = system.state();
                    let history_before = system.history().len();
                    system.explore(pid, &map(amounts)).unwrap();
                    prop_assert_eq!(system.state(), before);
                    prop_assert_eq!(system.history().len(), history_before);
                }
            }
            check_invariants(&system.state());
        }
    }

    #[test]
    fn committed_states_are_always_safe(ops in proptest::collection::vec(op_strategy(), 1..40)) {
        let mut system = AllocationSystem::new(&map([10, 12, 20]));

        for op in ops {
            match op {
                // Adding an over-claiming process can legitimately make the
                // state unsafe; requests never can, because unsafe outcomes
                // roll back. Track safety only across request commits.
                Op::Request { pid, amounts } => {
                    let was_safe = system.is_safe();
                    let status = system.request(pid, &map(amounts)).unwrap();
                    if was_safe && status.is_granted() {
                        prop_assert!(system.is_safe());
                    }
                }
                Op::Add { pid, claim } => {
                    let _ = system.add_process(pid, &map(claim));
                }
                Op::Release { pid } => {
                    let _ = system.release(pid);
                }
                Op::Remove { pid } => {
                    let _ = system.remove_process(pid);
                }
                Op::Explore { pid, amounts } => {
                    system.explore(pid, &map(amounts)).unwrap();
                }
            }
        }
    }

    #[test]
    fn safety_queries_are_repeatable(ops in proptest::collection::vec(op_strategy(), 1..20)) {
        let mut system = AllocationSystem::new(&map([10, 12, 20]));
        for op in ops {
            match op {
                Op::Add { pid, claim } => {
                    let _ = system.add_process(pid, &map(claim));
                }
                Op::Request { pid, amounts } => {
                    let _ = system.request(pid, &map(amounts)).unwrap();
                }
                Op::Release { pid } => {
                    let _ = system.release(pid);
                }
                Op::Remove { pid } => {
                    let _ = system.remove_process(pid);
                }
                Op::Explore { pid, amounts } => {
                    system.explore(pid, &map(amounts)).unwrap();
                }
            }
        }

        let verdict = (system.is_safe(), system.safe_sequence());
        prop_assert_eq!((system.is_safe(), system.safe_sequence()), verdict);
    }
}

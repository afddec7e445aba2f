//! Allocation, need and claim matrices plus per-resource utilization

use std::collections::BTreeMap;

use avert_types::{Pid, SystemState};
use serde::{Deserialize, Serialize};

/// One process row of a matrix, components in resource order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixRow {
    pub pid: Pid,
    pub values: Vec<u64>,
}

/// A per-process view of one vector family (allocated, need or claim)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matrix {
    /// Column order
    pub resources: Vec<String>,
    /// Rows in ascending pid order
    pub rows: Vec<MatrixRow>,
}

fn build_matrix(
    state: &SystemState,
    select: impl Fn(&avert_types::ProcessState) -> &BTreeMap<String, u64>,
) -> Matrix {
    let resources: Vec<String> = state.total.keys().cloned().collect();
    let rows = state
        .processes
        .iter()
        .map(|(pid, process)| MatrixRow {
            pid: *pid,
            values: resources
                .iter()
                .map(|r| select(process).get(r).copied().unwrap_or(0))
                .collect(),
        })
        .collect();
    Matrix { resources, rows }
}

/// Currently held resources per process
#[must_use]
pub fn allocation_matrix(state: &SystemState) -> Matrix {
    build_matrix(state, |p| &p.allocated)
}

/// Remaining need per process
#[must_use]
pub fn need_matrix(state: &SystemState) -> Matrix {
    build_matrix(state, |p| &p.need)
}

/// Declared maximum claim per process
#[must_use]
pub fn max_claim_matrix(state: &SystemState) -> Matrix {
    build_matrix(state, |p| &p.max_claim)
}

/// Used/total accounting for one resource type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUsage {
    pub used: u64,
    pub total: u64,
}

impl ResourceUsage {
    /// Utilization as a percentage, zero for an empty pool
    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            {
                self.used as f64 / self.total as f64 * 100.0
            }
        }
    }
}

/// How far a process is towards its declared maximum, summed over all
/// resource types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessProgress {
    pub allocated: u64,
    pub max_claim: u64,
}

impl ProcessProgress {
    /// Progress as a percentage, zero for an all-zero claim
    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.max_claim == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            {
                self.allocated as f64 / self.max_claim as f64 * 100.0
            }
        }
    }
}

/// Allocation progress per process
#[must_use]
pub fn process_progress(state: &SystemState) -> BTreeMap<Pid, ProcessProgress> {
    state
        .processes
        .iter()
        .map(|(pid, process)| {
            (
                *pid,
                ProcessProgress {
                    allocated: process.allocated.values().sum(),
                    max_claim: process.max_claim.values().sum(),
                },
            )
        })
        .collect()
}

/// Used/total per resource type
#[must_use]
pub fn resource_utilization(state: &SystemState) -> BTreeMap<String, ResourceUsage> {
    state
        .total
        .iter()
        .map(|(resource, total)| {
            let available = state.available.get(resource).copied().unwrap_or(0);
            (
                resource.clone(),
                ResourceUsage {
                    used: total - available,
                    total: *total,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use avert_core::AllocationSystem;

    fn map(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
        pairs
            .iter()
            .map(|(name, amount)| ((*name).to_string(), *amount))
            .collect()
    }

    fn system() -> AllocationSystem {
        let mut system = AllocationSystem::new(&map(&[("CPU", 10), ("Memory", 20)]));
        system
            .add_process(0, &map(&[("CPU", 5), ("Memory", 10)]))
            .unwrap();
        system
            .add_process(1, &map(&[("CPU", 3), ("Memory", 8)]))
            .unwrap();
        system
            .request(0, &map(&[("CPU", 2), ("Memory", 5)]))
            .unwrap();
        system
    }

    #[test]
    fn matrices_are_in_resource_and_pid_order() {
        let state = system().state();

        let alloc = allocation_matrix(&state);
        assert_eq!(alloc.resources, vec!["CPU", "Memory"]);
        assert_eq!(alloc.rows[0].pid, 0);
        assert_eq!(alloc.rows[0].values, vec![2, 5]);
        assert_eq!(alloc.rows[1].values, vec![0, 0]);

        let need = need_matrix(&state);
        assert_eq!(need.rows[0].values, vec![3, 5]);

        let max = max_claim_matrix(&state);
        assert_eq!(max.rows[1].values, vec![3, 8]);
    }

    #[test]
    fn utilization_tracks_used_over_total() {
        let state = system().state();
        let util = resource_utilization(&state);
        assert_eq!(util["CPU"], ResourceUsage { used: 2, total: 10 });
        assert!((util["Memory"].percent() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_total_resource_reports_zero_percent() {
        let usage = ResourceUsage { used: 0, total: 0 };
        assert!((usage.percent() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn progress_sums_over_resource_types() {
        let state = system().state();
        let progress = process_progress(&state);
        assert_eq!(
            progress[&0],
            ProcessProgress {
                allocated: 7,
                max_claim: 15
            }
        );
        assert_eq!(progress[&1].allocated, 0);
        assert!((progress[&0].percent() - 7.0 / 15.0 * 100.0).abs() < f64::EPSILON);
    }
}

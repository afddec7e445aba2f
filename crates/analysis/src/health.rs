//! Deadlock-risk estimate and overall system health

use std::collections::BTreeMap;

use avert_types::SystemState;
use serde::{Deserialize, Serialize};

use crate::matrix::resource_utilization;

/// Estimate deadlock risk on a 0.0–1.0 scale
///
/// Risk grows as outstanding need crowds out the available pool:
/// `need / (need + available)` summed over all resources, clamped to
/// 1.0. An empty system or one with nothing left to request scores 0.
#[must_use]
pub fn deadlock_risk(state: &SystemState) -> f64 {
    if state.processes.is_empty() {
        return 0.0;
    }

    let total_needed: u64 = state
        .processes
        .values()
        .map(|p| p.need.values().sum::<u64>())
        .sum();
    let total_available: u64 = state.available.values().sum();

    if total_needed == 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let risk = total_needed as f64 / (total_needed + total_available) as f64;
    risk.min(1.0)
}

/// Overall health summary for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemHealth {
    pub is_safe: bool,
    pub deadlock_risk: f64,
    pub process_count: usize,
    /// Utilization percentage per resource
    pub resource_utilization: BTreeMap<String, f64>,
}

/// Compute the health summary from a state report
#[must_use]
pub fn system_health(state: &SystemState) -> SystemHealth {
    let resource_utilization = resource_utilization(state)
        .into_iter()
        .map(|(resource, usage)| (resource, usage.percent()))
        .collect();
    SystemHealth {
        is_safe: state.is_safe,
        deadlock_risk: deadlock_risk(state),
        process_count: state.processes.len(),
        resource_utilization,
    }
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

    #[test]
    fn empty_system_has_zero_risk() {
        let system = AllocationSystem::new(&map(&[("CPU", 10)]));
        assert!((deadlock_risk(&system.state()) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn risk_rises_as_need_crowds_available() {
        let mut system = AllocationSystem::new(&map(&[("CPU", 10)]));
        system.add_process(0, &map(&[("CPU", 5)])).unwrap();
        let low = deadlock_risk(&system.state());

        system.request(0, &map(&[("CPU", 4)])).unwrap();
        system.add_process(1, &map(&[("CPU", 6)])).unwrap();
        let high = deadlock_risk(&system.state());

        assert!(high > low);
        assert!(high <= 1.0);
    }

    #[test]
    fn health_summary_reflects_state() {
        let mut system = AllocationSystem::new(&map(&[("CPU", 10), ("Memory", 20)]));
        system
            .add_process(0, &map(&[("CPU", 5), ("Memory", 10)]))
            .unwrap();
        system
            .request(0, &map(&[("CPU", 5), ("Memory", 0)]))
            .unwrap();

        let health = system_health(&system.state());
        assert!(health.is_safe);
        assert_eq!(health.process_count, 1);
        assert!((health.resource_utilization["CPU"] - 50.0).abs() < f64::EPSILON);
        assert!((health.resource_utilization["Memory"] - 0.0).abs() < f64::EPSILON);
    }
}

//! Integration tests for types

use std::collections::BTreeMap;

use avert_errors::DenialReason;
use avert_types::{
    HistoryAction, ProcessState, RequestStatus, ResourceSet, ResourceVector, SystemState,
};

fn map(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
    pairs
        .iter()
        .map(|(name, amount)| ((*name).to_string(), *amount))
        .collect()
}

#[test]
fn vector_round_trips_through_maps() {
    let set = ResourceSet::new(vec![
        "CPU".to_string(),
        "Memory".to_string(),
        "Disk".to_string(),
    ]);
    let source = map(&[("CPU", 10), ("Memory", 20), ("Disk", 15)]);
    let v = ResourceVector::from_map(&set, &source).unwrap();
    assert_eq!(v.to_map(&set), source);
}

#[test]
fn request_status_serializes_with_status_tag() {
    let granted = serde_json::to_value(&RequestStatus::Granted).unwrap();
    assert_eq!(granted["status"], "granted");

    let denied = RequestStatus::denied(DenialReason::ExceedsNeed {
        resource: "CPU".to_string(),
    });
    let json = serde_json::to_value(&denied).unwrap();
    assert_eq!(json["status"], "denied");
    assert_eq!(json["reason"]["ExceedsNeed"]["resource"], "CPU");
}

#[test]
fn request_status_messages_match_denial_reasons() {
    assert_eq!(
        RequestStatus::Granted.message(),
        "request granted - system remains safe"
    );
    let denied = RequestStatus::denied(DenialReason::ExceedsAvailable {
        resource: "Memory".to_string(),
    });
    assert_eq!(denied.message(), "insufficient Memory available");
}

#[test]
fn history_action_serializes_with_action_tag() {
    let action = HistoryAction::Allocate {
        pid: 3,
        request: map(&[("CPU", 2)]),
    };
    let json = serde_json::to_value(&action).unwrap();
    assert_eq!(json["action"], "allocate");
    assert_eq!(json["pid"], 3);
    assert_eq!(json["request"]["CPU"], 2);
}

#[test]
fn system_state_json_is_deterministic() {
    let state = SystemState {
        total: map(&[("CPU", 10), ("Memory", 20)]),
        available: map(&[("CPU", 8), ("Memory", 17)]),
        processes: BTreeMap::from([(
            0,
            ProcessState {
                max_claim: map(&[("CPU", 5), ("Memory", 10)]),
                allocated: map(&[("CPU", 2), ("Memory", 3)]),
                need: map(&[("CPU", 3), ("Memory", 7)]),
            },
        )]),
        is_safe: true,
        safe_sequence: vec![0],
    };
    let a = serde_json::to_string(&state).unwrap();
    let b = serde_json::to_string(&state).unwrap();
    assert_eq!(a, b);

    let back: SystemState = serde_json::from_str(&a).unwrap();
    assert_eq!(back, state);
}

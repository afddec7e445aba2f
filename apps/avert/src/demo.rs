//! Built-in demonstration scenarios

use std::collections::BTreeMap;

use avert_analysis::system_health;
use avert_core::AllocationSystem;

use crate::display::OutputRenderer;
use crate::error::CliError;

type DemoFn = fn(&OutputRenderer) -> Result<(), CliError>;

const SCENARIOS: [(&str, DemoFn); 6] = [
    ("Simple allocation", simple_allocation),
    ("Deadlock prevention", deadlock_prevention),
    ("Multi-resource system", multi_resource),
    ("What-if analysis", what_if_analysis),
    ("Process lifecycle", process_lifecycle),
    ("System health", health_check),
];

/// Run one scenario by number (1-based), or all of them
pub fn run(number: Option<usize>, renderer: &OutputRenderer) -> Result<(), CliError> {
    match number {
        Some(n) => {
            let (name, scenario) = SCENARIOS.get(n.wrapping_sub(1)).ok_or_else(|| {
                CliError::InvalidArguments(format!(
                    "no demo scenario {n}; pick 1-{}",
                    SCENARIOS.len()
                ))
            })?;
            renderer.heading(&format!("Scenario {n}: {name}"));
            scenario(renderer)
        }
        None => {
            for (i, (name, scenario)) in SCENARIOS.iter().enumerate() {
                renderer.heading(&format!("Scenario {}: {name}", i + 1));
                scenario(renderer)?;
            }
            Ok(())
        }
    }
}

fn map(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
    pairs
        .iter()
        .map(|(name, amount)| ((*name).to_string(), *amount))
        .collect()
}

fn simple_allocation(renderer: &OutputRenderer) -> Result<(), CliError> {
    let mut system = AllocationSystem::new(&map(&[("CPU", 10), ("Memory", 20)]));
    system.add_process(0, &map(&[("CPU", 5), ("Memory", 10)]))?;
    system.add_process(1, &map(&[("CPU", 3), ("Memory", 8)]))?;

    for (pid, request) in [
        (0, map(&[("CPU", 2), ("Memory", 5)])),
        (1, map(&[("CPU", 1), ("Memory", 3)])),
    ] {
        let status = system.request(pid, &request)?;
        renderer.render_request(pid, &request, &status);
    }

    renderer.render_state(&system.state());
    Ok(())
}

fn deadlock_prevention(renderer: &OutputRenderer) -> Result<(), CliError> {
    let mut system = AllocationSystem::new(&map(&[("CPU", 10)]));
    system.add_process(0, &map(&[("CPU", 7)]))?;
    system.add_process(1, &map(&[("CPU", 6)]))?;

    renderer.note("Two processes compete for 10 CPUs (claims: 7 and 6).");
    for (pid, request) in [
        (0, map(&[("CPU", 4)])),
        (1, map(&[("CPU", 4)])),
        // Would leave both needs above the remaining pool; the Banker
        // refuses it to keep a completion order available.
        (0, map(&[("CPU", 1)])),
        (1, map(&[("CPU", 2)])),
    ] {
        let status = system.request(pid, &request)?;
        renderer.render_request(pid, &request, &status);
    }

    renderer.render_state(&system.state());
    Ok(())
}

fn multi_resource(renderer: &OutputRenderer) -> Result<(), CliError> {
    let mut system = AllocationSystem::new(&map(&[
        ("CPU", 10),
        ("Memory", 20),
        ("Disk", 15),
        ("Network", 8),
    ]));
    system.add_process(
        0,
        &map(&[("CPU", 7), ("Memory", 5), ("Disk", 3), ("Network", 2)]),
    )?;
    system.add_process(
        1,
        &map(&[("CPU", 3), ("Memory", 2), ("Disk", 2), ("Network", 1)]),
    )?;
    system.add_process(
        2,
        &map(&[("CPU", 9), ("Memory", 0), ("Disk", 2), ("Network", 3)]),
    )?;

    for (pid, request) in [
        (0, map(&[("Memory", 1), ("Network", 1)])),
        (1, map(&[("CPU", 2), ("Disk", 1)])),
        (2, map(&[("CPU", 3), ("Disk", 2), ("Network", 1)])),
    ] {
        let status = system.request(pid, &request)?;
        renderer.render_request(pid, &request, &status);
    }

    renderer.render_state(&system.state());
    Ok(())
}

fn what_if_analysis(renderer: &OutputRenderer) -> Result<(), CliError> {
    let mut system = AllocationSystem::new(&map(&[("CPU", 10), ("Memory", 20)]));
    system.add_process(0, &map(&[("CPU", 5), ("Memory", 10)]))?;
    system.add_process(1, &map(&[("CPU", 4), ("Memory", 7)]))?;
    system.request(0, &map(&[("CPU", 2), ("Memory", 3)]))?;
    system.request(1, &map(&[("CPU", 1), ("Memory", 2)]))?;

    renderer.render_state(&system.state());
    renderer.note("Exploring requests without committing any of them:");
    for (pid, request) in [
        (0, map(&[("CPU", 2), ("Memory", 5)])),
        (0, map(&[("CPU", 3), ("Memory", 7)])),
        (1, map(&[("CPU", 2), ("Memory", 4)])),
        (1, map(&[("CPU", 3), ("Memory", 5)])),
    ] {
        let report = system.explore(pid, &request)?;
        renderer.render_what_if(pid, &request, &report);
    }

    renderer.note("State after exploration is unchanged:");
    renderer.render_state(&system.state());
    Ok(())
}

fn process_lifecycle(renderer: &OutputRenderer) -> Result<(), CliError> {
    let mut system = AllocationSystem::new(&map(&[("CPU", 8), ("Memory", 16)]));
    system.add_process(0, &map(&[("CPU", 4), ("Memory", 8)]))?;
    system.add_process(1, &map(&[("CPU", 3), ("Memory", 6)]))?;
    system.add_process(2, &map(&[("CPU", 2), ("Memory", 4)]))?;

    for (pid, request) in [
        (0, map(&[("CPU", 2), ("Memory", 4)])),
        (1, map(&[("CPU", 2), ("Memory", 3)])),
        (2, map(&[("CPU", 1), ("Memory", 2)])),
    ] {
        let status = system.request(pid, &request)?;
        renderer.render_request(pid, &request, &status);
    }
    renderer.render_state(&system.state());

    renderer.note("Processes complete and release in turn:");
    for pid in [0, 1, 2] {
        renderer.render_release(pid, system.release(pid));
    }
    renderer.render_state(&system.state());
    renderer.render_history(system.history());
    Ok(())
}

fn health_check(renderer: &OutputRenderer) -> Result<(), CliError> {
    let mut system = AllocationSystem::new(&map(&[("CPU", 10), ("Memory", 20), ("Disk", 15)]));
    system.add_process(0, &map(&[("CPU", 5), ("Memory", 10), ("Disk", 8)]))?;
    system.add_process(1, &map(&[("CPU", 4), ("Memory", 8), ("Disk", 5)]))?;
    system.add_process(2, &map(&[("CPU", 3), ("Memory", 6), ("Disk", 4)]))?;

    for (pid, request) in [
        (0, map(&[("CPU", 3), ("Memory", 5), ("Disk", 4)])),
        (1, map(&[("CPU", 2), ("Memory", 4), ("Disk", 2)])),
        (2, map(&[("CPU", 1), ("Memory", 2), ("Disk", 1)])),
    ] {
        system.request(pid, &request)?;
    }

    let state = system.state();
    renderer.render_health(&system_health(&state));
    renderer.render_state(&state);
    Ok(())
}

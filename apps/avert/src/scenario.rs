//! TOML scenario files
//!
//! A scenario declares the resource pool, the initial processes, and an
//! ordered list of steps to drive through the allocation system:
//!
//! ```toml
//! name = "tight allocation"
//!
//! [resources]
//! CPU = 10
//! Memory = 20
//!
//! [[processes]]
//! pid = 0
//! max_claim = { CPU = 5, Memory = 10 }
//!
//! [[steps]]
//! op = "request"
//! pid = 0
//! resources = { CPU = 2, Memory = 5 }
//!
//! [[steps]]
//! op = "report"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use avert_analysis::system_health;
use avert_core::AllocationSystem;
use avert_errors::ScenarioError;
use avert_types::Pid;
use serde::Deserialize;
use tracing::info;

use crate::display::OutputRenderer;
use crate::error::CliError;

/// A parsed scenario file
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub resources: BTreeMap<String, u64>,
    #[serde(default)]
    pub processes: Vec<ProcessDecl>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Initial process declaration
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessDecl {
    pub pid: Pid,
    pub max_claim: BTreeMap<String, u64>,
}

/// One scripted operation
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Step {
    /// Register another process mid-scenario
    Add {
        pid: Pid,
        max_claim: BTreeMap<String, u64>,
    },
    /// Request resources through the Banker's Algorithm
    Request {
        pid: Pid,
        resources: BTreeMap<String, u64>,
    },
    /// Release everything a process holds
    Release { pid: Pid },
    /// Remove a process, returning its allocation
    Remove { pid: Pid },
    /// What-if exploration; never changes state
    Explore {
        pid: Pid,
        resources: BTreeMap<String, u64>,
    },
    /// Print the full state, health and history
    Report,
}

impl Scenario {
    /// Load and parse a scenario file
    ///
    /// # Errors
    ///
    /// `ReadFailed` if the file cannot be read, `ParseError` if it is
    /// not a valid scenario document.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ScenarioError::ReadFailed {
            message: format!("{}: {e}", path.display()),
        })?;
        toml::from_str(&raw).map_err(|e| ScenarioError::ParseError {
            message: e.to_string(),
        })
    }

    /// Execute every step against a fresh system, rendering outcomes
    ///
    /// # Errors
    ///
    /// Propagates registry errors (duplicate/missing process, unknown
    /// resource); request denials are outcomes, not errors.
    pub fn execute(&self, renderer: &OutputRenderer) -> Result<(), CliError> {
        info!(name = %self.name, steps = self.steps.len(), "running scenario");
        renderer.heading(&format!("Scenario: {}", self.name));
        if let Some(description) = &self.description {
            renderer.note(description);
        }

        let mut system = AllocationSystem::new(&self.resources);
        for process in &self.processes {
            system.add_process(process.pid, &process.max_claim)?;
        }
        renderer.render_state(&system.state());

        for step in &self.steps {
            match step {
                Step::Add { pid, max_claim } => {
                    system.add_process(*pid, max_claim)?;
                    renderer.note(&format!("P{pid} added"));
                }
                Step::Request { pid, resources } => {
                    let status = system.request(*pid, resources)?;
                    renderer.render_request(*pid, resources, &status);
                }
                Step::Release { pid } => {
                    let released = system.release(*pid);
                    renderer.render_release(*pid, released);
                }
                Step::Remove { pid } => {
                    let released = system.remove_process(*pid)?;
                    renderer.render_removed(*pid, &released);
                }
                Step::Explore { pid, resources } => {
                    let report = system.explore(*pid, resources)?;
                    renderer.render_what_if(*pid, resources, &report);
                }
                Step::Report => {
                    let state = system.state();
                    renderer.render_health(&system_health(&state));
                    renderer.render_state(&state);
                    renderer.render_history(system.history());
                }
            }
        }

        renderer.heading("Final state");
        renderer.render_state(&system.state());
        renderer.render_history(system.history());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_scenario() {
        let doc = r#"
            name = "lifecycle"
            description = "allocate then release"

            [resources]
            CPU = 8
            Memory = 16

            [[processes]]
            pid = 0
            max_claim = { CPU = 4, Memory = 8 }

            [[steps]]
            op = "request"
            pid = 0
            resources = { CPU = 2, Memory = 4 }

            [[steps]]
            op = "explore"
            pid = 0
            resources = { CPU = 1 }

            [[steps]]
            op = "release"
            pid = 0

            [[steps]]
            op = "report"
        "#;

        let scenario: Scenario = toml::from_str(doc).unwrap();
        assert_eq!(scenario.name, "lifecycle");
        assert_eq!(scenario.resources["CPU"], 8);
        assert_eq!(scenario.processes.len(), 1);
        assert_eq!(scenario.steps.len(), 4);
        assert!(matches!(scenario.steps[0], Step::Request { pid: 0, .. }));
        assert!(matches!(scenario.steps[3], Step::Report));
    }

    #[test]
    fn unknown_op_is_a_parse_error() {
        let doc = r#"
            name = "bad"

            [resources]
            CPU = 1

            [[steps]]
            op = "frobnicate"
        "#;
        assert!(toml::from_str::<Scenario>(doc).is_err());
    }

    #[test]
    fn missing_resources_table_is_a_parse_error() {
        let doc = r#"name = "empty""#;
        assert!(toml::from_str::<Scenario>(doc).is_err());
    }
}

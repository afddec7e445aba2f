//! Output rendering and formatting

use std::collections::BTreeMap;

use avert_analysis::SystemHealth;
use avert_types::{ColorChoice, HistoryAction, HistoryEntry, Pid, RequestStatus, SystemState, WhatIfReport};
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, ContentArrangement, Table};
use console::Style;
use serde_json::json;

const BAR_WIDTH: usize = 20;

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
    /// Color configuration
    color_choice: ColorChoice,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(json_output: bool, color_choice: ColorChoice) -> Self {
        Self {
            json_output,
            color_choice,
        }
    }

    fn style(&self) -> Style {
        match self.color_choice {
            ColorChoice::Always => Style::new().force_styling(true),
            ColorChoice::Auto => Style::new(),
            ColorChoice::Never => Style::new().force_styling(false),
        }
    }

    /// Section heading
    pub fn heading(&self, text: &str) {
        if self.json_output {
            return;
        }
        let style = self.style().bold();
        println!("\n{}", style.apply_to(text));
    }

    /// Plain informational line
    pub fn note(&self, text: &str) {
        if !self.json_output {
            println!("{text}");
        }
    }

    /// Render full system state: utilization, process table, safety
    pub fn render_state(&self, state: &SystemState) {
        if self.json_output {
            self.render_json(&json!({ "state": state }));
            return;
        }

        let mut resources = Table::new();
        resources
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Resource").add_attribute(Attribute::Bold),
                Cell::new("Available").add_attribute(Attribute::Bold),
                Cell::new("Allocated").add_attribute(Attribute::Bold),
                Cell::new("Total").add_attribute(Attribute::Bold),
                Cell::new("Usage").add_attribute(Attribute::Bold),
            ]);
        for (resource, total) in &state.total {
            let available = state.available.get(resource).copied().unwrap_or(0);
            let used = total - available;
            #[allow(clippy::cast_precision_loss)]
            let pct = if *total == 0 {
                0.0
            } else {
                used as f64 / *total as f64 * 100.0
            };
            resources.add_row(vec![
                Cell::new(resource),
                Cell::new(available),
                Cell::new(used),
                Cell::new(total),
                Cell::new(format!("{} {pct:>5.1}%", usage_bar(pct))),
            ]);
        }
        println!("{resources}");

        if !state.processes.is_empty() {
            let mut processes = Table::new();
            let mut header = vec![Cell::new("PID").add_attribute(Attribute::Bold)];
            for resource in state.total.keys() {
                header.push(
                    Cell::new(format!("{resource} (alloc/need/max)"))
                        .add_attribute(Attribute::Bold),
                );
            }
            processes
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(header);
            for (pid, process) in &state.processes {
                let mut row = vec![Cell::new(format!("P{pid}"))];
                for resource in state.total.keys() {
                    row.push(Cell::new(format!(
                        "{} / {} / {}",
                        process.allocated.get(resource).copied().unwrap_or(0),
                        process.need.get(resource).copied().unwrap_or(0),
                        process.max_claim.get(resource).copied().unwrap_or(0),
                    )));
                }
                processes.add_row(row);
            }
            println!("{processes}");
        }

        self.render_safety(state.is_safe, &state.safe_sequence);
    }

    /// Safety verdict line with witness sequence
    pub fn render_safety(&self, is_safe: bool, sequence: &[Pid]) {
        if self.json_output {
            self.render_json(&json!({ "is_safe": is_safe, "safe_sequence": sequence }));
            return;
        }
        if is_safe {
            let ok = self.style().green().bold();
            print!("{}", ok.apply_to("System is SAFE"));
            if sequence.is_empty() {
                println!();
            } else {
                let order = sequence
                    .iter()
                    .map(|pid| format!("P{pid}"))
                    .collect::<Vec<_>>()
                    .join(" -> ");
                println!("  (safe sequence: {order})");
            }
        } else {
            let bad = self.style().red().bold();
            println!("{}", bad.apply_to("System is UNSAFE - deadlock is possible"));
        }
    }

    /// Outcome of a resource request
    pub fn render_request(&self, pid: Pid, request: &BTreeMap<String, u64>, status: &RequestStatus) {
        if self.json_output {
            self.render_json(&json!({ "pid": pid, "request": request, "outcome": status }));
            return;
        }
        let styled = if status.is_granted() {
            self.style().green().apply_to(status.to_string())
        } else {
            self.style().red().apply_to(status.to_string())
        };
        println!("P{pid} requests {}: {styled} ({})", format_map(request), status.message());
    }

    /// Outcome of a what-if exploration
    pub fn render_what_if(&self, pid: Pid, request: &BTreeMap<String, u64>, report: &WhatIfReport) {
        if self.json_output {
            self.render_json(&json!({ "pid": pid, "request": request, "what_if": report }));
            return;
        }
        let verdict = if report.feasible {
            self.style().green().apply_to("FEASIBLE")
        } else {
            self.style().red().apply_to("NOT FEASIBLE")
        };
        println!("What if P{pid} requested {}? {verdict}", format_map(request));
        println!("  {}", report.message);
        if !report.safe_sequence.is_empty() {
            let order = report
                .safe_sequence
                .iter()
                .map(|pid| format!("P{pid}"))
                .collect::<Vec<_>>()
                .join(" -> ");
            println!("  Safe sequence: {order}");
        }
    }

    /// Outcome of a release
    pub fn render_release(&self, pid: Pid, released: bool) {
        if self.json_output {
            self.render_json(&json!({ "pid": pid, "released": released }));
            return;
        }
        if released {
            println!("P{pid} released all resources");
        } else {
            println!("P{pid} not found; nothing released");
        }
    }

    /// Outcome of a process removal
    pub fn render_removed(&self, pid: Pid, released: &BTreeMap<String, u64>) {
        if self.json_output {
            self.render_json(&json!({ "pid": pid, "removed": true, "released": released }));
            return;
        }
        println!("P{pid} removed; returned {}", format_map(released));
    }

    /// System health summary
    pub fn render_health(&self, health: &SystemHealth) {
        if self.json_output {
            self.render_json(&json!({ "health": health }));
            return;
        }
        self.heading("System Health");
        self.render_safety(health.is_safe, &[]);
        println!("Deadlock risk: {:.1}%", health.deadlock_risk * 100.0);
        println!("Active processes: {}", health.process_count);
        println!("Resource utilization:");
        for (resource, pct) in &health.resource_utilization {
            println!("  {resource:<10} [{}] {pct:>5.1}%", usage_bar(*pct));
        }
    }

    /// Committed-action history listing
    pub fn render_history(&self, history: &[HistoryEntry]) {
        if self.json_output {
            self.render_json(&json!({ "history": history }));
            return;
        }
        if history.is_empty() {
            println!("No committed actions.");
            return;
        }
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("#").add_attribute(Attribute::Bold),
                Cell::new("Action").add_attribute(Attribute::Bold),
                Cell::new("PID").add_attribute(Attribute::Bold),
                Cell::new("Resources").add_attribute(Attribute::Bold),
            ]);
        for entry in history {
            let (action, pid, payload) = match &entry.action {
                HistoryAction::Allocate { pid, request } => ("allocate", *pid, request),
                HistoryAction::Release { pid, released } => ("release", *pid, released),
            };
            table.add_row(vec![
                Cell::new(entry.seq),
                Cell::new(action),
                Cell::new(format!("P{pid}")),
                Cell::new(format_map(payload)),
            ]);
        }
        println!("{table}");
    }

    fn render_json(&self, value: &serde_json::Value) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("failed to serialize output: {e}"),
        }
    }
}

fn usage_bar(pct: f64) -> String {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = ((pct / 100.0 * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    let mut bar = String::with_capacity(BAR_WIDTH * 3);
    for _ in 0..filled {
        bar.push('█');
    }
    for _ in filled..BAR_WIDTH {
        bar.push('░');
    }
    bar
}

fn format_map(map: &BTreeMap<String, u64>) -> String {
    if map.is_empty() {
        return "(nothing)".to_string();
    }
    map.iter()
        .map(|(resource, amount)| format!("{resource}={amount}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for the avert allocation simulator
//!
//! This crate provides the value types used throughout the system: the
//! per-system resource set, dense resource vectors indexed over it, and
//! the serializable report shapes produced by the core's query API.

pub mod history;
pub mod resources;
pub mod state;

// Re-export commonly used types
pub use history::{HistoryAction, HistoryEntry};
pub use resources::{ResourceSet, ResourceVector};
pub use state::{ProcessState, RequestStatus, SafetyVerdict, SystemState, WhatIfReport};

use serde::{Deserialize, Serialize};

/// Process identifier, assigned by the caller and unique per system
pub type Pid = u32;

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Always,
    Auto,
    Never,
}

impl clap::ValueEnum for ColorChoice {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Always, Self::Auto, Self::Never]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Always => clap::builder::PossibleValue::new("always"),
            Self::Auto => clap::builder::PossibleValue::new("auto"),
            Self::Never => clap::builder::PossibleValue::new("never"),
        })
    }
}

impl Default for ColorChoice {
    fn default() -> Self {
        Self::Auto
    }
}

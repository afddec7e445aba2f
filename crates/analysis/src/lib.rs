#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Read-only analysis over the allocation core's query API
//!
//! Everything here consumes [`avert_core::AllocationSystem`] state
//! reports (plus what-if exploration) and produces serializable
//! summaries for rendering; nothing holds state of its own.

pub mod health;
pub mod matrix;
pub mod request;

pub use health::{deadlock_risk, system_health, SystemHealth};
pub use matrix::{
    allocation_matrix, max_claim_matrix, need_matrix, process_progress, resource_utilization,
    Matrix, MatrixRow, ProcessProgress, ResourceUsage,
};
pub use request::{analyze_request, RequestAnalysis, RequestChecks};

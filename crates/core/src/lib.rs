#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Deadlock-avoidance allocation core
//!
//! This crate implements the Banker's Algorithm state machine: process
//! bookkeeping, the safety check, the request/grant/deny protocol with
//! atomic commit-or-rollback, and read-only what-if exploration.
//!
//! # Concurrency
//!
//! [`AllocationSystem`] is a single-writer, synchronous state machine.
//! Every operation runs to completion without blocking and returns a
//! result immediately. When embedding in a concurrent host, treat the
//! whole system as one shared resource behind a single serialization
//! point (a mutex or a single owning task): request validation reads
//! `available` and `need` and later mutates them, so interleaving two
//! mutating operations risks a lost update. Note that
//! [`AllocationSystem::explore`] mutates internally behind a snapshot
//! and therefore counts as a writer.

pub mod explore;
pub mod history;
pub mod process;
pub mod registry;
pub mod safety;
pub mod snapshot;
pub mod system;

pub use history::HistoryLog;
pub use process::Process;
pub use registry::ProcessRegistry;
pub use safety::safety_check;
pub use snapshot::StateSnapshot;
pub use system::AllocationSystem;

#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for the avert allocation simulator
//!
//! This crate provides fine-grained error types organized by domain.
//! Every failure in the core is recoverable and returned as a value;
//! nothing here ever aborts the process.

use std::borrow::Cow;

use thiserror::Error;

pub mod allocation;
pub mod scenario;

pub use allocation::{AllocationError, DenialReason};
pub use scenario::ScenarioError;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Error {
    #[error("allocation error: {0}")]
    Allocation(#[from] AllocationError),

    #[error("scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an internal error with a message
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias for avert operations
pub type Result<T> = std::result::Result<T, Error>;

/// Minimal interface for rendering user-facing error information without
/// requiring heavyweight envelopes.
pub trait UserFacingError {
    /// Short message suitable for CLI output.
    fn user_message(&self) -> Cow<'_, str>;

    /// Optional remediation hint.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Error::Allocation(err) => err.user_message(),
            Error::Scenario(err) => err.user_message(),
            Error::Internal(_) => Cow::Owned(self.to_string()),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Error::Allocation(err) => err.user_hint(),
            Error::Scenario(err) => err.user_hint(),
            Error::Internal(_) => None,
        }
    }
}

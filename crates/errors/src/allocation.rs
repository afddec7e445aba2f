//! Allocation and registry error types

use std::borrow::Cow;

use thiserror::Error;

use crate::UserFacingError;

/// Errors from registry and system operations
///
/// These are hard failures of an operation's preconditions. Denials of a
/// resource request are not errors; they are [`DenialReason`] values
/// carried inside a granted/denied status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AllocationError {
    #[error("process {pid} already exists")]
    DuplicateProcess { pid: u32 },

    #[error("process {pid} not found")]
    ProcessNotFound { pid: u32 },

    #[error("unknown resource: {name}")]
    UnknownResource { name: String },
}

impl UserFacingError for AllocationError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            AllocationError::DuplicateProcess { .. } => {
                Some("Pick an unused process id or remove the existing process first.")
            }
            AllocationError::ProcessNotFound { .. } => {
                Some("Add the process before operating on it.")
            }
            AllocationError::UnknownResource { .. } => {
                Some("Resource names are fixed at system creation; check the spelling.")
            }
        }
    }
}

/// Why a resource request was denied
///
/// Variants are ordered by validation cost: existence and bound checks
/// short-circuit before the safety simulation runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DenialReason {
    #[error("process {pid} not found")]
    ProcessNotFound { pid: u32 },

    #[error("request exceeds need for {resource}")]
    ExceedsNeed { resource: String },

    #[error("insufficient {resource} available")]
    ExceedsAvailable { resource: String },

    #[error("request denied - would lead to unsafe state")]
    UnsafeState,
}

//! Scenario file error types

use std::borrow::Cow;

use thiserror::Error;

use crate::UserFacingError;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScenarioError {
    #[error("failed to read scenario file: {message}")]
    ReadFailed { message: String },

    #[error("failed to parse scenario: {message}")]
    ParseError { message: String },

    #[error("scenario step {index} is invalid: {message}")]
    InvalidStep { index: usize, message: String },
}

impl UserFacingError for ScenarioError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            ScenarioError::ReadFailed { .. } => Some("Check the path and file permissions."),
            ScenarioError::ParseError { .. } | ScenarioError::InvalidStep { .. } => {
                Some("Steps must name one of: add, request, release, remove, explore, report.")
            }
        }
    }
}

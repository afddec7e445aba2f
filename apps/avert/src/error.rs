//! CLI error handling

use std::fmt;

use avert_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Core allocation error
    Allocation(avert_errors::Error),
    /// Scenario file error
    Scenario(avert_errors::ScenarioError),
    /// Invalid command arguments
    InvalidArguments(String),
    /// I/O error
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Allocation(e) => {
                write!(f, "{}", e.user_message())?;
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                Ok(())
            }
            CliError::Scenario(e) => {
                write!(f, "{}", e.user_message())?;
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                Ok(())
            }
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Allocation(e) => Some(e),
            CliError::Scenario(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::InvalidArguments(_) => None,
        }
    }
}

impl From<avert_errors::Error> for CliError {
    fn from(e: avert_errors::Error) -> Self {
        CliError::Allocation(e)
    }
}

impl From<avert_errors::ScenarioError> for CliError {
    fn from(e: avert_errors::ScenarioError) -> Self {
        CliError::Scenario(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

//! Error types for rota.
//!
//! Uses thiserror for derive macros. Every variant is a hard failure that
//! leaves dispatcher state untouched; benign repeats (resolving a resolved
//! issue, assigning an assigned one) are not errors and never show up here.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for rota operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RotaError {
    /// Malformed or empty required input, rejected before any mutation.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Referenced agent does not exist.
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    /// Referenced issue does not exist.
    #[error("Issue not found: {0}")]
    IssueNotFound(String),

    /// The issue status machine rejected the requested change.
    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    /// A filter query carried an unrecognized key or enumerated value.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Config or scenario file could not be parsed or failed validation.
    #[error("{0}")]
    Config(String),

    /// A scenario step did not behave as the scenario said it would.
    #[error("Scenario failed: {0}")]
    Scenario(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl RotaError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            RotaError::Validation(_) => exit_codes::VALIDATION_FAILURE,
            RotaError::AgentNotFound(_) | RotaError::IssueNotFound(_) => exit_codes::NOT_FOUND,
            RotaError::InvalidTransition(_) => exit_codes::INVALID_TRANSITION,
            RotaError::InvalidFilter(_) => exit_codes::INVALID_FILTER,
            RotaError::Config(_) | RotaError::Scenario(_) | RotaError::Io(_) => {
                exit_codes::USER_ERROR
            }
        }
    }
}

/// Result type alias for rota operations.
pub type Result<T> = std::result::Result<T, RotaError>;

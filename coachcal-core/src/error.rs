//! Error types for coachcal.

use thiserror::Error;

/// Errors that can occur in coachcal operations.
#[derive(Error, Debug)]
pub enum CoachCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data source error: {0}")]
    Source(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Training session not found: {0}")]
    SessionNotFound(String),

    #[error("Group not found: {0}")]
    UnknownGroup(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<serde_json::Error> for CoachCalError {
    fn from(e: serde_json::Error) -> Self {
        CoachCalError::Serialization(e.to_string())
    }
}

/// Result type alias for coachcal operations.
pub type CoachCalResult<T> = Result<T, CoachCalError>;

//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid requirements: {0}")]
    InvalidRequirements(String),

    #[error("Unknown concert type: {0}")]
    UnknownConcertType(String),

    #[error("Unknown skill level: {0}")]
    UnknownSkillLevel(String),

    #[error("Session is already {0}")]
    SessionClosed(String),

    #[error("Participant {0} was not invited to this session")]
    ParticipantNotInvited(String),

    #[error("{0} participant(s) have not responded yet")]
    SessionIncomplete(usize),
}

impl DomainError {
    /// Check if this error was caused by caller input rather than internal state
    pub fn is_caller_error(&self) -> bool {
        !matches!(
            self,
            DomainError::SessionClosed(_) | DomainError::SessionIncomplete(_)
        )
    }
}

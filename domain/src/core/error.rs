//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("No families supplied for consensus")]
    NoFamilies,

    #[error("Voting item not found: {0}")]
    VoteNotFound(String),

    #[error("Editing session not found: {0}")]
    SessionNotFound(String),

    #[error("Change not found: {0}")]
    ChangeNotFound(String),

    #[error("Feedback item not found: {0}")]
    FeedbackNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DomainError {
    /// Check if this error is a "not found" condition (maps to a client error)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::VoteNotFound(_)
                | DomainError::SessionNotFound(_)
                | DomainError::ChangeNotFound(_)
                | DomainError::FeedbackNotFound(_)
        )
    }
}

use thiserror::Error;

/// Error taxonomy shared by every action-api operation and repository call.
///
/// Variants map directly onto the action-api's external error surface so a
/// caller can branch on kind without string-matching a message.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("wrong state: {0}")]
    WrongState(String),

    #[error("rule violation: {0}")]
    RuleViolation(String),

    #[error("timed out: {0}")]
    Timeout(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ActionError {
    pub fn kind(&self) -> &'static str {
        match self {
            ActionError::InvalidInput(_) => "invalidInput",
            ActionError::NotFound(_) => "notFound",
            ActionError::Unauthorized(_) => "unauthorized",
            ActionError::Conflict(_) => "conflict",
            ActionError::WrongState(_) => "wrongState",
            ActionError::RuleViolation(_) => "ruleViolation",
            ActionError::Timeout(_) => "timeout",
            ActionError::Internal(_) => "internal",
        }
    }
}

//! Error types for input sources and primitive actions

use thiserror::Error;

/// Errors raised while building primitive actions.
///
/// Every variant is raised before the offending action touches any
/// timeline, so callers can correct the call and carry on with the same
/// sequence.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// A value is out of range, a key does not resolve to a single code
    /// point, or an action was sent to the wrong kind of device
    #[error("Validation error: {0}")]
    Validation(String),

    /// The device registry cannot satisfy the request (unknown or duplicate
    /// device id, no primary pointer, no keyboard)
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ActionError {
    pub fn validation(message: impl Into<String>) -> Self {
        ActionError::Validation(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        ActionError::Configuration(message.into())
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ActionError::Validation(_) => "validation",
            ActionError::Configuration(_) => "configuration",
        }
    }

    /// Neither kind goes away by retrying the same call.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

pub type ActionResult<T> = Result<T, ActionError>;

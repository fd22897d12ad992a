//! Sequence builder error types

use action_primitives::ActionError;
use thiserror::Error;
use wd_bridge::TransportError;

/// Errors surfaced by the sequence builder
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// Rejected before any timeline was touched
    #[error(transparent)]
    Action(#[from] ActionError),

    /// Reported by the transport, passed through unchanged
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl FlowError {
    pub fn is_validation(&self) -> bool {
        matches!(self, FlowError::Action(ActionError::Validation(_)))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, FlowError::Action(ActionError::Configuration(_)))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, FlowError::Transport(_))
    }

    pub fn code(&self) -> &'static str {
        match self {
            FlowError::Action(err) => err.code(),
            FlowError::Transport(err) => err.code(),
        }
    }
}

pub type FlowResult<T> = Result<T, FlowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_message_is_not_rewrapped() {
        let inner = TransportError::MoveTargetOutOfBounds("x=9000".into());
        let err = FlowError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
        assert_eq!(err.code(), "move target out of bounds");
        assert!(err.is_transport());
    }

    #[test]
    fn action_errors_keep_their_kind() {
        let err = FlowError::from(ActionError::validation("negative button"));
        assert!(err.is_validation());
        assert!(!err.is_configuration());
        assert_eq!(err.to_string(), ActionError::validation("negative button").to_string());
    }
}

use thiserror::Error;

/// Failures reported by a transport round trip.
///
/// Variants follow the error codes a WebDriver remote end returns for the
/// actions endpoints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("no such session")]
    NoSuchSession,
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("move target out of bounds: {0}")]
    MoveTargetOutOfBounds(String),
    #[error("no such element: {0}")]
    NoSuchElement(String),
    #[error("transport unavailable: {0}")]
    Unavailable(String),
    #[error("not implemented")]
    NotImplemented,
}

pub type TransportResult<T> = Result<T, TransportError>;

impl TransportError {
    pub fn code(&self) -> &'static str {
        match self {
            TransportError::NoSuchSession => "invalid session id",
            TransportError::InvalidArgument(_) => "invalid argument",
            TransportError::MoveTargetOutOfBounds(_) => "move target out of bounds",
            TransportError::NoSuchElement(_) => "no such element",
            TransportError::Unavailable(_) => "unknown error",
            TransportError::NotImplemented => "unsupported operation",
        }
    }

    /// Only connectivity failures can succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransportError::Unavailable(_))
    }
}

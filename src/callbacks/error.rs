use crate::data::DataError;
use thiserror::Error;

/// Result type for callback handlers
pub type CallbackResult<T> = Result<T, CallbackError>;

/// Reasons a single callback invocation fails
#[derive(Debug, Error)]
pub enum CallbackError {
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Invalid input {input}: {reason}")]
    InvalidInput { input: String, reason: String },

    #[error("No callback listens to '{0}'")]
    UnknownTrigger(String),

    #[error("Callback {callback} returned {got} outputs, expected {expected}")]
    OutputMismatch {
        callback: &'static str,
        expected: usize,
        got: usize,
    },

    #[error(transparent)]
    Data(#[from] DataError),
}

impl CallbackError {
    pub fn invalid(input: &str, reason: impl Into<String>) -> Self {
        CallbackError::InvalidInput {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the client sent something unusable, as opposed to a server fault
    pub fn is_client_error(&self) -> bool {
        match self {
            CallbackError::MissingInput(_)
            | CallbackError::InvalidInput { .. }
            | CallbackError::UnknownTrigger(_) => true,
            CallbackError::Data(DataError::UnknownLayer(_)) => true,
            _ => false,
        }
    }
}

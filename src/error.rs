use std::fmt;

/// Unified error type for the permflow crate.
#[derive(Debug, Clone)]
pub enum FlowError {
    /// A permission identifier outside the supported set.
    UnknownPermission(String),
    /// Invalid input provided by the caller.
    InvalidInput(String),
    /// Internal error.
    Internal(String),
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowError::UnknownPermission(key) => write!(f, "unknown permission: {key}"),
            FlowError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            FlowError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for FlowError {}

/// Result type alias using [`FlowError`].
pub type FlowResult<T> = Result<T, FlowError>;

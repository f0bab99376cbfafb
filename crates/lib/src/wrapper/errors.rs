//! Error types for node decorators.
//!
//! Decorators introduce exactly two kinds of failure of their own: rejected
//! configuration (raised eagerly by constructors and `with_*` builders) and
//! rejected mutation (raised by immutable nodes and stub properties). Errors
//! from the wrapped node pass through untouched.

use thiserror::Error;

/// Structured error types for decorator operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum WrapperError {
    /// A constructor or builder received an unusable argument
    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },

    /// The decorator does not permit this operation
    #[error("Unsupported operation '{operation}': {reason}")]
    UnsupportedOperation { operation: String, reason: String },
}

impl WrapperError {
    pub(crate) fn invalid_argument(argument: &str, reason: impl Into<String>) -> Self {
        WrapperError::InvalidArgument {
            argument: argument.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported(operation: &str, reason: &str) -> Self {
        WrapperError::UnsupportedOperation {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Check if this error is a configuration-time validation failure
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, WrapperError::InvalidArgument { .. })
    }

    /// Check if this error is a rejected mutation
    pub fn is_unsupported_operation(&self) -> bool {
        matches!(self, WrapperError::UnsupportedOperation { .. })
    }

    /// Get the rejected operation, if any
    pub fn operation(&self) -> Option<&str> {
        match self {
            WrapperError::UnsupportedOperation { operation, .. } => Some(operation),
            _ => None,
        }
    }
}

// Conversion from WrapperError to the main Error type
impl From<WrapperError> for crate::Error {
    fn from(err: WrapperError) -> Self {
        crate::Error::Wrapper(err)
    }
}

/// Fails unless `value` is non-empty.
pub(crate) fn require_non_empty(argument: &str, value: &str) -> Result<(), WrapperError> {
    if value.is_empty() {
        Err(WrapperError::invalid_argument(argument, "must not be empty"))
    } else {
        Ok(())
    }
}

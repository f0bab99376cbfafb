//! Error types raised by node implementations.
//!
//! These are the errors a content store produces on its own: missing items,
//! stale handles, lock and version conflicts, and value conversion failures.
//! Decorators forward them unchanged.

use thiserror::Error;

/// Structured error types for repository operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No item exists at the given path
    #[error("Path not found: {path}")]
    PathNotFound { path: String },

    /// An item with the same name already exists
    #[error("Item already exists: {path}")]
    ItemExists { path: String },

    /// The handle refers to an item that has been removed
    #[error("Invalid item state: {identifier} no longer exists")]
    InvalidItemState { identifier: String },

    /// The path is malformed
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// A lock could not be acquired or released
    #[error("Lock error on {path}: {reason}")]
    Lock { path: String, reason: String },

    /// The node is checked in or otherwise version-protected
    #[error("Version error on {path}: {reason}")]
    Version { path: String, reason: String },

    /// A value could not be converted to the requested type
    #[error("Cannot convert value to {target}: {reason}")]
    ValueFormat { target: String, reason: String },

    /// The operation would violate a node type or structural constraint
    #[error("Constraint violation on {path}: {reason}")]
    ConstraintViolation { path: String, reason: String },
}

impl RepositoryError {
    /// Check if this error indicates an item was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::PathNotFound { .. })
    }

    /// Check if this error indicates a duplicate item
    pub fn is_item_exists(&self) -> bool {
        matches!(self, RepositoryError::ItemExists { .. })
    }

    /// Check if this error indicates a stale handle
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, RepositoryError::InvalidItemState { .. })
    }

    /// Check if this error is a value conversion failure
    pub fn is_value_format_error(&self) -> bool {
        matches!(self, RepositoryError::ValueFormat { .. })
    }

    /// Check if this error is related to locking
    pub fn is_lock_error(&self) -> bool {
        matches!(self, RepositoryError::Lock { .. })
    }

    /// Check if this error is related to versioning
    pub fn is_version_error(&self) -> bool {
        matches!(self, RepositoryError::Version { .. })
    }

    /// Check if this error is a constraint violation
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, RepositoryError::ConstraintViolation { .. })
    }

    /// Get the path if this is a path-related error
    pub fn path(&self) -> Option<&str> {
        match self {
            RepositoryError::PathNotFound { path }
            | RepositoryError::ItemExists { path }
            | RepositoryError::InvalidPath { path, .. }
            | RepositoryError::Lock { path, .. }
            | RepositoryError::Version { path, .. }
            | RepositoryError::ConstraintViolation { path, .. } => Some(path),
            _ => None,
        }
    }

    pub(crate) fn value_format(target: impl Into<String>, reason: impl Into<String>) -> Self {
        RepositoryError::ValueFormat {
            target: target.into(),
            reason: reason.into(),
        }
    }
}

// Conversion from RepositoryError to the main Error type
impl From<RepositoryError> for crate::Error {
    fn from(err: RepositoryError) -> Self {
        crate::Error::Repository(err)
    }
}

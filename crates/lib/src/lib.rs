//!
//! node-decorators: composable views over a hierarchical content repository.
//!
//! This library wraps nodes of a JCR-style content tree with decorators that
//! synthesize, override, fall back between and freeze node/property views, and
//! provides a fluent builder that renders SQL2 query strings.
//!
//! ## Core Concepts
//!
//! * **Nodes (`node::Node`)**: The capability interface every node implementation and
//!   every decorator satisfies: hierarchy navigation, typed properties, identity and
//!   the mutation surface.
//! * **Values (`value::Value`)**: Typed property values with repository-style conversions
//!   and ISO8601 calendar rendering.
//! * **Decorators (`wrapper`)**: Each decorator owns exactly one delegate and composes by nesting:
//!     * **NullableDelegateNode**: Makes "no underlying node" a crash-free, synthetic state.
//!     * **StubProperty**: A read-only property that is not backed by the store.
//!     * **DefineParentNode**: Presents a node under a different, synthetic parent.
//!     * **AlteringNode**: Overlays and hides properties and child nodes.
//!     * **FallbackNode**: Resolves values through an ordered list of fallback nodes.
//!     * **ImmutableNode**: Rejects every mutation.
//! * **Store (`store::MemoryWorkspace`)**: An in-memory reference implementation of the
//!   node contract, used as the delegate the decorators wrap.
//! * **SQL2 (`sql2`)**: Conditions, junctions, joins and full-text expressions that render
//!   themselves into query strings.

pub mod constants;
pub mod node;
pub mod sql2;
pub mod store;
pub mod value;
pub mod wrapper;

pub use node::{Item, NameFilter, Node, NodeExt, NodeRef, NodeType, Property, PropertyRef};
pub use value::{PropertyType, Value, Values};

/// Result type used throughout the node-decorators library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the node-decorators library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured repository errors raised by node implementations
    #[error(transparent)]
    Repository(node::RepositoryError),

    /// Structured decorator errors from the wrapper module
    #[error(transparent)]
    Wrapper(wrapper::WrapperError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Repository(_) => "node",
            Error::Wrapper(_) => "wrapper",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates an item was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Repository(repo_err) => repo_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error indicates a rejected mutation.
    pub fn is_unsupported_operation(&self) -> bool {
        match self {
            Error::Wrapper(wrapper_err) => wrapper_err.is_unsupported_operation(),
            _ => false,
        }
    }

    /// Check if this error is a configuration-time validation failure.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Error::Wrapper(wrapper_err) => wrapper_err.is_invalid_argument(),
            _ => false,
        }
    }

    /// Check if this error is a value conversion failure.
    pub fn is_value_format_error(&self) -> bool {
        match self {
            Error::Repository(repo_err) => repo_err.is_value_format_error(),
            _ => false,
        }
    }

    /// Check if this error is related to locking.
    pub fn is_lock_error(&self) -> bool {
        match self {
            Error::Repository(repo_err) => repo_err.is_lock_error(),
            _ => false,
        }
    }

    /// Check if this error is related to versioning.
    pub fn is_version_error(&self) -> bool {
        match self {
            Error::Repository(repo_err) => repo_err.is_version_error(),
            _ => false,
        }
    }

    /// Check if this error was raised by the repository rather than a decorator.
    pub fn is_repository_error(&self) -> bool {
        matches!(self, Error::Repository(_))
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}

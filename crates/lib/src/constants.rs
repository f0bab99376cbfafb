//! Constants used throughout the node-decorators library.
//!
//! Central definitions for well-known node type names, workspace defaults and
//! the fixed messages carried by unsupported-operation errors.

/// Name of the base node type every primary type extends.
pub const NT_BASE: &str = "nt:base";

/// Default primary type for nodes added without an explicit type.
pub const NT_UNSTRUCTURED: &str = "nt:unstructured";

/// Primary type of a workspace root node.
pub const REP_ROOT: &str = "rep:root";

/// Default name of an in-memory workspace.
pub const DEFAULT_WORKSPACE: &str = "default";

/// Fixture key selecting a node's primary type.
pub const JCR_PRIMARY_TYPE: &str = "jcr:primaryType";

/// Fixture key listing a node's mixin types.
pub const JCR_MIXIN_TYPES: &str = "jcr:mixinTypes";

/// Path of the root node.
pub const ROOT_PATH: &str = "/";

/// Message carried by every mutation rejected by an immutable node.
pub const IMMUTABLE_NODE: &str = "node is immutable and cannot be modified";

/// Message carried by every mutation rejected by a stub property.
pub const READ_ONLY_PROPERTY: &str = "stub properties are read-only";

//! Decorator tests
//!
//! Each decorator is exercised over the in-memory store, alone and composed
//! with the others the way callers stack them.

mod composition;
mod define_parent;
mod fallback;
mod nullable;
mod stub_property;

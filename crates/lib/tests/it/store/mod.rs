//! In-memory store tests
//!
//! These cover the reference node implementation the decorators are layered
//! over: navigation, mutation rules, fixture import and value conversions.

mod node;
mod values;

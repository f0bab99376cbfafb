//! SQL2 statement tests
//!
//! Complete queries assembled the way search components build them: optional
//! filters added unconditionally, qualified by a selector, with joins and
//! ordering.

mod queries;

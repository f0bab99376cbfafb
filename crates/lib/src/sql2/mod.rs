//! SQL2 query builder.
//!
//! Conditions are small value types that render themselves into JCR-SQL2
//! text through [`Condition::append_to`]. A condition whose inputs are blank
//! renders nothing and reports [`Condition::is_empty`]; junctions skip such
//! children, so optional filters can be added unconditionally.
//!
//! ```
//! use node_decorators::sql2::{self, Condition, Query};
//!
//! let filter = sql2::and()
//!     .add(sql2::is_descendant_node("/content/site"))
//!     .add(sql2::property("title").lower_case().contains_any(["news"]))
//!     .add(sql2::property("hidden").equals_any(Vec::<String>::new()));
//!
//! assert_eq!(
//!     filter.to_sql(),
//!     "(ISDESCENDANTNODE([/content/site]) AND LOWER([title]) LIKE '%news%')"
//! );
//!
//! let query = Query::select("mgnl:page").as_selector("p").filter(filter);
//! assert_eq!(
//!     query.to_sql(),
//!     "SELECT * FROM [mgnl:page] AS p WHERE (ISDESCENDANTNODE(p, [/content/site]) \
//!      AND LOWER(p.[title]) LIKE '%news%')"
//! );
//! ```

use std::fmt;

pub mod fulltext;
pub mod join;
pub mod junction;
pub mod literal;
pub mod path;
pub mod property;
pub mod query;

pub use fulltext::{FullTextCondition, Term, contains, contains_all};
pub use join::{Join, JoinCondition, JoinType};
pub use junction::{Junction, JunctionType, and, or};
pub use path::{PathCondition, PathRelation, is_child_node, is_descendant_node, is_same_node};
pub use property::{Operator, PropertyCondition, PropertyOperand, property};
pub use query::{Order, Query};

/// Supplies the selector name that qualifies property and path references.
pub trait SelectorNameProvider {
    fn selector_name(&self) -> Option<&str>;
}

/// Renders unqualified references, e.g. `[title]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSelector;

impl SelectorNameProvider for NoSelector {
    fn selector_name(&self) -> Option<&str> {
        None
    }
}

/// Renders references qualified by a selector name, e.g. `p.[title]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    name: String,
}

impl Selector {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl SelectorNameProvider for Selector {
    fn selector_name(&self) -> Option<&str> {
        Some(&self.name).filter(|name| !name.is_empty()).map(String::as_str)
    }
}

/// A constraint that renders itself into SQL2.
pub trait Condition: fmt::Debug {
    /// Appends this condition to `sql`. Empty conditions append nothing.
    fn append_to(&self, sql: &mut String, selector: &dyn SelectorNameProvider);

    fn is_empty(&self) -> bool;

    fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// Renders this condition without a selector.
    fn to_sql(&self) -> String {
        self.to_sql_with(&NoSelector)
    }

    fn to_sql_with(&self, selector: &dyn SelectorNameProvider) -> String {
        let mut sql = String::new();
        self.append_to(&mut sql, selector);
        sql
    }
}

impl<C: Condition + ?Sized> Condition for Box<C> {
    fn append_to(&self, sql: &mut String, selector: &dyn SelectorNameProvider) {
        (**self).append_to(sql, selector)
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}

/// Returns true if `value` is empty or only whitespace.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Appends `[name]`, qualified by the selector when there is one.
pub(crate) fn append_property(sql: &mut String, selector: &dyn SelectorNameProvider, name: &str) {
    if let Some(selector) = selector.selector_name() {
        sql.push_str(selector);
        sql.push('.');
    }
    sql.push('[');
    sql.push_str(name);
    sql.push(']');
}

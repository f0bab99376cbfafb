//! Complete SQL2 statements.

use std::fmt;

use super::{Condition, Join, NoSelector, Selector, SelectorNameProvider, append_property};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

impl Order {
    fn keyword(&self) -> &'static str {
        match self {
            Order::Ascending => "ASC",
            Order::Descending => "DESC",
        }
    }
}

/// A `SELECT` statement over one node type.
///
/// ```
/// use node_decorators::sql2::{self, Join, JoinCondition, Order, Query};
///
/// let query = Query::select("mgnl:page")
///     .as_selector("p")
///     .join(Join::inner("mgnl:area", "a", JoinCondition::child_node("a", "p")))
///     .filter(sql2::property("hidden").is_null())
///     .order_by("title", Order::Ascending);
/// assert_eq!(
///     query.to_string(),
///     "SELECT * FROM [mgnl:page] AS p INNER JOIN [mgnl:area] AS a ON ISCHILDNODE(a, p) \
///      WHERE NOT p.[hidden] IS NOT NULL ORDER BY p.[title] ASC"
/// );
/// ```
#[derive(Debug)]
pub struct Query {
    node_type: String,
    selector: Option<Selector>,
    joins: Vec<Join>,
    condition: Option<Box<dyn Condition>>,
    orderings: Vec<(String, Order)>,
}

impl Query {
    pub fn select(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            selector: None,
            joins: Vec::new(),
            condition: None,
            orderings: Vec::new(),
        }
    }

    /// Names the main selector; conditions and orderings are qualified by it.
    #[must_use]
    pub fn as_selector(mut self, name: impl Into<String>) -> Self {
        self.selector = Some(Selector::new(name));
        self
    }

    #[must_use]
    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    /// Sets the `WHERE` constraint. An empty condition omits the clause.
    #[must_use]
    pub fn filter(mut self, condition: impl Condition + 'static) -> Self {
        self.condition = Some(Box::new(condition));
        self
    }

    #[must_use]
    pub fn order_by(mut self, property: impl Into<String>, order: Order) -> Self {
        self.orderings.push((property.into(), order));
        self
    }

    fn selector(&self) -> &dyn SelectorNameProvider {
        match &self.selector {
            Some(selector) => selector,
            None => &NoSelector,
        }
    }

    pub fn to_sql(&self) -> String {
        let selector = self.selector();
        let mut sql = format!("SELECT * FROM [{}]", self.node_type);
        if let Some(name) = selector.selector_name() {
            sql.push_str(" AS ");
            sql.push_str(name);
        }
        for join in &self.joins {
            join.append_to(&mut sql);
        }
        if let Some(condition) = self.condition.as_ref().filter(|c| c.is_not_empty()) {
            sql.push_str(" WHERE ");
            condition.append_to(&mut sql, selector);
        }
        for (index, (property, order)) in self.orderings.iter().enumerate() {
            sql.push_str(if index == 0 { " ORDER BY " } else { ", " });
            append_property(&mut sql, selector, property);
            sql.push(' ');
            sql.push_str(order.keyword());
        }
        tracing::trace!(query = %sql, "Rendered SQL2 query");
        sql
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

//! Boolean groups of conditions.

use super::{Condition, SelectorNameProvider};

/// How the children of a [`Junction`] combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JunctionType {
    /// All children must match (AND)
    #[default]
    All,
    /// Any child may match (OR)
    Any,
}

impl JunctionType {
    fn operator(&self) -> &'static str {
        match self {
            JunctionType::All => " AND ",
            JunctionType::Any => " OR ",
        }
    }
}

/// A group of conditions joined with AND or OR.
///
/// Empty children are skipped. A group with one remaining child renders as
/// that child; a group with none is itself empty.
///
/// ```
/// use node_decorators::sql2::{self, Condition};
///
/// let either = sql2::or()
///     .add(sql2::property("a").equals_any(["1"]))
///     .add(sql2::property("b").equals_any(["2"]));
/// assert_eq!(either.to_sql(), "([a] = '1' OR [b] = '2')");
///
/// let single = sql2::and().add(sql2::property("a").equals_any(["1"]));
/// assert_eq!(single.to_sql(), "[a] = '1'");
/// ```
#[derive(Debug, Default)]
pub struct Junction {
    junction_type: JunctionType,
    negate: bool,
    conditions: Vec<Box<dyn Condition>>,
}

/// Starts an AND group.
pub fn and() -> Junction {
    Junction::new(JunctionType::All)
}

/// Starts an OR group.
pub fn or() -> Junction {
    Junction::new(JunctionType::Any)
}

impl Junction {
    pub fn new(junction_type: JunctionType) -> Self {
        Self {
            junction_type,
            negate: false,
            conditions: Vec::new(),
        }
    }

    /// Adds a child condition.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn add(mut self, condition: impl Condition + 'static) -> Self {
        self.conditions.push(Box::new(condition));
        self
    }

    /// Adds a child condition if there is one.
    #[must_use]
    pub fn add_option(self, condition: Option<impl Condition + 'static>) -> Self {
        match condition {
            Some(condition) => self.add(condition),
            None => self,
        }
    }

    /// Negates the whole group.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    pub fn junction_type(&self) -> JunctionType {
        self.junction_type
    }

    /// Number of children, empty ones included.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    fn rendered_children(&self) -> impl Iterator<Item = &Box<dyn Condition>> {
        self.conditions
            .iter()
            .filter(|condition| condition.is_not_empty())
    }
}

impl Condition for Junction {
    fn append_to(&self, sql: &mut String, selector: &dyn SelectorNameProvider) {
        let children: Vec<_> = self.rendered_children().collect();
        match children.as_slice() {
            [] => {}
            [only] if !self.negate => only.append_to(sql, selector),
            [only] => {
                sql.push_str("NOT (");
                only.append_to(sql, selector);
                sql.push(')');
            }
            many => {
                if self.negate {
                    sql.push_str("NOT ");
                }
                sql.push('(');
                for (index, child) in many.iter().enumerate() {
                    if index > 0 {
                        sql.push_str(self.junction_type.operator());
                    }
                    child.append_to(sql, selector);
                }
                sql.push(')');
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.rendered_children().next().is_none()
    }
}

//! Joins between selectors.
//!
//! Join conditions name their selectors explicitly, so they render the same
//! whichever [`SelectorNameProvider`] they are given.

use super::{Condition, SelectorNameProvider, is_blank};

/// The constraint that links two selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinCondition {
    /// `left.[left_property] = right.[right_property]`
    Equi {
        left: String,
        left_property: String,
        right: String,
        right_property: String,
    },
    /// `ISCHILDNODE(child, parent)`
    ChildNode { child: String, parent: String },
    /// `ISDESCENDANTNODE(descendant, ancestor)`
    DescendantNode { descendant: String, ancestor: String },
    /// `ISSAMENODE(left, right[, [path]])`
    SameNode {
        left: String,
        right: String,
        path: Option<String>,
    },
}

impl JoinCondition {
    pub fn equi(
        left: impl Into<String>,
        left_property: impl Into<String>,
        right: impl Into<String>,
        right_property: impl Into<String>,
    ) -> Self {
        JoinCondition::Equi {
            left: left.into(),
            left_property: left_property.into(),
            right: right.into(),
            right_property: right_property.into(),
        }
    }

    pub fn child_node(child: impl Into<String>, parent: impl Into<String>) -> Self {
        JoinCondition::ChildNode {
            child: child.into(),
            parent: parent.into(),
        }
    }

    pub fn descendant_node(descendant: impl Into<String>, ancestor: impl Into<String>) -> Self {
        JoinCondition::DescendantNode {
            descendant: descendant.into(),
            ancestor: ancestor.into(),
        }
    }

    pub fn same_node(left: impl Into<String>, right: impl Into<String>) -> Self {
        JoinCondition::SameNode {
            left: left.into(),
            right: right.into(),
            path: None,
        }
    }

    /// Same-node join where `right` is reached from `left` through `path`.
    pub fn same_node_at(
        left: impl Into<String>,
        right: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        JoinCondition::SameNode {
            left: left.into(),
            right: right.into(),
            path: Some(path.into()),
        }
    }
}

impl Condition for JoinCondition {
    fn append_to(&self, sql: &mut String, _selector: &dyn SelectorNameProvider) {
        if self.is_empty() {
            return;
        }
        match self {
            JoinCondition::Equi {
                left,
                left_property,
                right,
                right_property,
            } => {
                sql.push_str(&format!("{left}.[{left_property}] = {right}.[{right_property}]"));
            }
            JoinCondition::ChildNode { child, parent } => {
                sql.push_str(&format!("ISCHILDNODE({child}, {parent})"));
            }
            JoinCondition::DescendantNode {
                descendant,
                ancestor,
            } => {
                sql.push_str(&format!("ISDESCENDANTNODE({descendant}, {ancestor})"));
            }
            JoinCondition::SameNode { left, right, path } => {
                sql.push_str(&format!("ISSAMENODE({left}, {right}"));
                if let Some(path) = path.as_deref().filter(|path| !is_blank(path)) {
                    sql.push_str(&format!(", [{path}]"));
                }
                sql.push(')');
            }
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            JoinCondition::Equi {
                left,
                left_property,
                right,
                right_property,
            } => [left, left_property, right, right_property]
                .into_iter()
                .any(|part| is_blank(part)),
            JoinCondition::ChildNode { child, parent } => is_blank(child) || is_blank(parent),
            JoinCondition::DescendantNode {
                descendant,
                ancestor,
            } => is_blank(descendant) || is_blank(ancestor),
            JoinCondition::SameNode { left, right, .. } => is_blank(left) || is_blank(right),
        }
    }
}

/// Kind of join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinType {
    #[default]
    Inner,
    LeftOuter,
    RightOuter,
}

impl JoinType {
    fn keyword(&self) -> &'static str {
        match self {
            JoinType::Inner => "INNER JOIN",
            JoinType::LeftOuter => "LEFT OUTER JOIN",
            JoinType::RightOuter => "RIGHT OUTER JOIN",
        }
    }
}

/// A joined selector: `INNER JOIN [type] AS selector ON condition`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    join_type: JoinType,
    node_type: String,
    selector: String,
    condition: JoinCondition,
}

impl Join {
    pub fn new(
        join_type: JoinType,
        node_type: impl Into<String>,
        selector: impl Into<String>,
        condition: JoinCondition,
    ) -> Self {
        Self {
            join_type,
            node_type: node_type.into(),
            selector: selector.into(),
            condition,
        }
    }

    pub fn inner(
        node_type: impl Into<String>,
        selector: impl Into<String>,
        condition: JoinCondition,
    ) -> Self {
        Self::new(JoinType::Inner, node_type, selector, condition)
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub(crate) fn append_to(&self, sql: &mut String) {
        sql.push(' ');
        sql.push_str(self.join_type.keyword());
        sql.push_str(&format!(" [{}] AS {} ON ", self.node_type, self.selector));
        self.condition.append_to(sql, &super::NoSelector);
    }
}

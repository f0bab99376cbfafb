//! Path constraints.

use super::{Condition, SelectorNameProvider, is_blank};

/// How a node relates to the path of a [`PathCondition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRelation {
    Child,
    Descendant,
    Same,
}

impl PathRelation {
    fn function(&self) -> &'static str {
        match self {
            PathRelation::Child => "ISCHILDNODE",
            PathRelation::Descendant => "ISDESCENDANTNODE",
            PathRelation::Same => "ISSAMENODE",
        }
    }
}

/// Restricts results by their position in the tree.
///
/// ```
/// use node_decorators::sql2::{self, Condition, Selector};
///
/// let under_site = sql2::is_descendant_node("/content/site");
/// assert_eq!(under_site.to_sql(), "ISDESCENDANTNODE([/content/site])");
/// assert_eq!(
///     under_site.to_sql_with(&Selector::new("p")),
///     "ISDESCENDANTNODE(p, [/content/site])"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathCondition {
    relation: PathRelation,
    path: String,
    negate: bool,
}

pub fn is_child_node(path: impl Into<String>) -> PathCondition {
    PathCondition::new(PathRelation::Child, path)
}

pub fn is_descendant_node(path: impl Into<String>) -> PathCondition {
    PathCondition::new(PathRelation::Descendant, path)
}

pub fn is_same_node(path: impl Into<String>) -> PathCondition {
    PathCondition::new(PathRelation::Same, path)
}

impl PathCondition {
    pub fn new(relation: PathRelation, path: impl Into<String>) -> Self {
        Self {
            relation,
            path: path.into(),
            negate: false,
        }
    }

    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    pub fn relation(&self) -> PathRelation {
        self.relation
    }
}

impl Condition for PathCondition {
    fn append_to(&self, sql: &mut String, selector: &dyn SelectorNameProvider) {
        if self.is_empty() {
            return;
        }
        if self.negate {
            sql.push_str("NOT ");
        }
        sql.push_str(self.relation.function());
        sql.push('(');
        if let Some(selector) = selector.selector_name() {
            sql.push_str(selector);
            sql.push_str(", ");
        }
        sql.push('[');
        sql.push_str(self.path.trim());
        sql.push_str("])");
    }

    fn is_empty(&self) -> bool {
        is_blank(&self.path)
    }
}

//! Property comparison conditions.

use std::fmt;

use super::{
    Condition, SelectorNameProvider, append_property, is_blank,
    literal::{append_literal, escape_like, quote},
};
use crate::value::Value;

/// Comparison applied by a [`PropertyCondition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `=` against any of the values
    EqualsAny,
    /// `<>` against all of the values
    ExcludesAll,
    LowerThan,
    LowerOrEqualThan,
    GreaterThan,
    GreaterOrEqualThan,
    /// `LIKE` with caller-supplied patterns
    LikeAny,
    StartsWithAny,
    EndsWithAny,
    ContainsAny,
    IsNotNull,
    IsNull,
}

impl Operator {
    fn symbol(&self) -> &'static str {
        match self {
            Operator::EqualsAny => "=",
            Operator::ExcludesAll => "<>",
            Operator::LowerThan => "<",
            Operator::LowerOrEqualThan => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterOrEqualThan => ">=",
            Operator::LikeAny
            | Operator::StartsWithAny
            | Operator::EndsWithAny
            | Operator::ContainsAny => "LIKE",
            Operator::IsNotNull | Operator::IsNull => "IS NOT NULL",
        }
    }

    fn is_like(&self) -> bool {
        matches!(
            self,
            Operator::LikeAny
                | Operator::StartsWithAny
                | Operator::EndsWithAny
                | Operator::ContainsAny
        )
    }

    fn takes_values(&self) -> bool {
        !matches!(self, Operator::IsNotNull | Operator::IsNull)
    }

    fn joiner(&self) -> &'static str {
        match self {
            Operator::ExcludesAll => " AND ",
            _ => " OR ",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Case {
    Lower,
    Upper,
}

/// The left-hand side of a property condition.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyOperand {
    name: String,
    case: Option<Case>,
}

/// Starts a condition on the property `name`.
pub fn property(name: impl Into<String>) -> PropertyOperand {
    PropertyOperand {
        name: name.into(),
        case: None,
    }
}

impl PropertyOperand {
    /// Compares `LOWER([name])` and lower-cases string values.
    #[must_use]
    pub fn lower_case(mut self) -> Self {
        self.case = Some(Case::Lower);
        self
    }

    /// Compares `UPPER([name])` and upper-cases string values.
    #[must_use]
    pub fn upper_case(mut self) -> Self {
        self.case = Some(Case::Upper);
        self
    }

    fn condition<I, V>(self, operator: Operator, values: I) -> PropertyCondition
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        PropertyCondition {
            operand: self,
            operator,
            values: values.into_iter().map(Into::into).collect(),
            negate: false,
        }
    }

    fn text_condition<I, S>(self, operator: Operator, texts: I) -> PropertyCondition
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = texts.into_iter().map(|text| Value::String(text.into()));
        self.condition(operator, values)
    }

    pub fn equals_any<I, V>(self, values: I) -> PropertyCondition
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.condition(Operator::EqualsAny, values)
    }

    pub fn excludes_all<I, V>(self, values: I) -> PropertyCondition
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.condition(Operator::ExcludesAll, values)
    }

    pub fn lower_than(self, value: impl Into<Value>) -> PropertyCondition {
        self.condition(Operator::LowerThan, [value.into()])
    }

    pub fn lower_or_equal_than(self, value: impl Into<Value>) -> PropertyCondition {
        self.condition(Operator::LowerOrEqualThan, [value.into()])
    }

    pub fn greater_than(self, value: impl Into<Value>) -> PropertyCondition {
        self.condition(Operator::GreaterThan, [value.into()])
    }

    pub fn greater_or_equal_than(self, value: impl Into<Value>) -> PropertyCondition {
        self.condition(Operator::GreaterOrEqualThan, [value.into()])
    }

    /// Matches any of the LIKE `patterns`; wildcards are passed through.
    pub fn like_any<I, S>(self, patterns: I) -> PropertyCondition
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text_condition(Operator::LikeAny, patterns)
    }

    pub fn starts_with_any<I, S>(self, prefixes: I) -> PropertyCondition
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text_condition(Operator::StartsWithAny, prefixes)
    }

    pub fn ends_with_any<I, S>(self, suffixes: I) -> PropertyCondition
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text_condition(Operator::EndsWithAny, suffixes)
    }

    pub fn contains_any<I, S>(self, fragments: I) -> PropertyCondition
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text_condition(Operator::ContainsAny, fragments)
    }

    /// Matches nodes that have the property.
    pub fn is_not_null(self) -> PropertyCondition {
        self.condition(Operator::IsNotNull, Vec::<Value>::new())
    }

    /// Matches nodes that lack the property.
    pub fn is_null(self) -> PropertyCondition {
        self.condition(Operator::IsNull, Vec::<Value>::new())
    }

    fn append_to(&self, sql: &mut String, selector: &dyn SelectorNameProvider) {
        let function = match self.case {
            Some(Case::Lower) => Some("LOWER("),
            Some(Case::Upper) => Some("UPPER("),
            None => None,
        };
        if let Some(function) = function {
            sql.push_str(function);
        }
        append_property(sql, selector, &self.name);
        if function.is_some() {
            sql.push(')');
        }
    }

    fn adjust_case(&self, text: &str) -> String {
        match self.case {
            Some(Case::Lower) => text.to_lowercase(),
            Some(Case::Upper) => text.to_uppercase(),
            None => text.to_string(),
        }
    }
}

/// A comparison between a property and one or more values.
///
/// ```
/// use node_decorators::sql2::{self, Condition};
///
/// let rank = sql2::property("rank").greater_or_equal_than(3i64);
/// assert_eq!(rank.to_sql(), "[rank] >= 3");
///
/// let tags = sql2::property("tag").excludes_all(["draft", "it's"]);
/// assert_eq!(tags.to_sql(), "([tag] <> 'draft' AND [tag] <> 'it''s')");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyCondition {
    operand: PropertyOperand,
    operator: Operator,
    values: Vec<Value>,
    negate: bool,
}

impl PropertyCondition {
    /// Negates the condition.
    #[must_use]
    // Builder method, not std::ops::Not
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Values that take part in rendering; blank strings are dropped.
    fn effective_values(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().filter(|value| match value {
            Value::String(text) => !is_blank(text),
            _ => true,
        })
    }

    fn append_comparison(
        &self,
        sql: &mut String,
        selector: &dyn SelectorNameProvider,
        value: &Value,
    ) {
        self.operand.append_to(sql, selector);
        sql.push(' ');
        sql.push_str(self.operator.symbol());
        sql.push(' ');
        if self.operator.is_like() {
            let text = self.operand.adjust_case(&value.to_string());
            let pattern = match self.operator {
                Operator::StartsWithAny => format!("{}%", escape_like(&text)),
                Operator::EndsWithAny => format!("%{}", escape_like(&text)),
                Operator::ContainsAny => format!("%{}%", escape_like(&text)),
                _ => text,
            };
            sql.push_str(&quote(&pattern));
        } else if let Value::String(text) = value {
            sql.push_str(&quote(&self.operand.adjust_case(text)));
        } else {
            append_literal(sql, value);
        }
    }
}

impl Condition for PropertyCondition {
    fn append_to(&self, sql: &mut String, selector: &dyn SelectorNameProvider) {
        if self.is_empty() {
            return;
        }
        let negate_null = self.operator == Operator::IsNull;
        if self.negate != negate_null {
            sql.push_str("NOT ");
        }
        if !self.operator.takes_values() {
            self.operand.append_to(sql, selector);
            sql.push(' ');
            sql.push_str(self.operator.symbol());
            return;
        }

        let values: Vec<&Value> = self.effective_values().collect();
        let grouped = values.len() > 1 || self.negate;
        if grouped {
            sql.push('(');
        }
        for (index, value) in values.iter().enumerate() {
            if index > 0 {
                sql.push_str(self.operator.joiner());
            }
            self.append_comparison(sql, selector, value);
        }
        if grouped {
            sql.push(')');
        }
    }

    fn is_empty(&self) -> bool {
        if is_blank(&self.operand.name) {
            return true;
        }
        self.operator.takes_values() && self.effective_values().next().is_none()
    }
}

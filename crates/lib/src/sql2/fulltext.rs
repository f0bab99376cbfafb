//! Full-text search constraints.
//!
//! A [`FullTextCondition`] renders `CONTAINS(scope, 'expression')`. Terms are
//! combined with spaces (all must match) or with `OR` (any may match). Each
//! term may be a phrase, fuzzy, boosted or excluded:
//!
//! ```
//! use node_decorators::sql2::{self, Condition, Term};
//!
//! let search = sql2::contains("text")
//!     .term("magnolia")
//!     .term(Term::phrase("content management").boost(2.0))
//!     .term(Term::word("cms").fuzzy())
//!     .term(Term::word("legacy").exclude());
//! assert_eq!(
//!     search.to_sql(),
//!     r#"CONTAINS([text], 'magnolia "content management"^2 cms~ -legacy')"#
//! );
//! ```

use super::{Condition, SelectorNameProvider, append_property, is_blank, literal::quote};

/// One term of a full-text expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    text: String,
    phrase: bool,
    fuzzy: bool,
    boost: Option<f64>,
    excluded: bool,
}

impl Term {
    /// A single word.
    pub fn word(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            phrase: false,
            fuzzy: false,
            boost: None,
            excluded: false,
        }
    }

    /// Words that must appear together, rendered in double quotes.
    pub fn phrase(text: impl Into<String>) -> Self {
        Self {
            phrase: true,
            ..Self::word(text)
        }
    }

    /// Matches similar spellings (`~`).
    #[must_use]
    pub fn fuzzy(mut self) -> Self {
        self.fuzzy = true;
        self
    }

    /// Weights matches of this term (`^boost`).
    #[must_use]
    pub fn boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    /// Excludes results containing this term (`-`).
    #[must_use]
    pub fn exclude(mut self) -> Self {
        self.excluded = true;
        self
    }

    fn is_blank(&self) -> bool {
        is_blank(&self.text)
    }

    fn append_to(&self, expression: &mut String) {
        if self.excluded {
            expression.push('-');
        }
        let text = self.text.trim();
        if self.phrase {
            expression.push('"');
            expression.push_str(&text.replace('"', "\\\""));
            expression.push('"');
        } else {
            expression.push_str(text);
        }
        if self.fuzzy {
            expression.push('~');
        }
        if let Some(boost) = self.boost {
            expression.push('^');
            expression.push_str(&boost.to_string());
        }
    }
}

impl From<&str> for Term {
    fn from(text: &str) -> Self {
        Term::word(text)
    }
}

impl From<String> for Term {
    fn from(text: String) -> Self {
        Term::word(text)
    }
}

/// A `CONTAINS` constraint over one property or all properties.
#[derive(Debug, Clone, PartialEq)]
pub struct FullTextCondition {
    /// `None` searches every property
    property: Option<String>,
    terms: Vec<Term>,
    any: bool,
    negate: bool,
}

/// Searches the property `name`.
pub fn contains(name: impl Into<String>) -> FullTextCondition {
    FullTextCondition::new(Some(name.into()))
}

/// Searches all properties of the node.
pub fn contains_all() -> FullTextCondition {
    FullTextCondition::new(None)
}

impl FullTextCondition {
    fn new(property: Option<String>) -> Self {
        Self {
            property,
            terms: Vec::new(),
            any: false,
            negate: false,
        }
    }

    #[must_use]
    pub fn term(mut self, term: impl Into<Term>) -> Self {
        self.terms.push(term.into());
        self
    }

    /// Adds several plain words.
    #[must_use]
    pub fn terms<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.terms.extend(words.into_iter().map(Term::word));
        self
    }

    /// Matches when any term matches instead of all.
    #[must_use]
    pub fn any(mut self) -> Self {
        self.any = true;
        self
    }

    /// Matches only when every term matches. This is the default.
    #[must_use]
    pub fn all(mut self) -> Self {
        self.any = false;
        self
    }

    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    /// The rendered full-text expression, before quoting.
    pub fn expression(&self) -> String {
        let separator = if self.any { " OR " } else { " " };
        let mut expression = String::new();
        for (index, term) in self.terms.iter().filter(|t| !t.is_blank()).enumerate() {
            if index > 0 {
                expression.push_str(separator);
            }
            term.append_to(&mut expression);
        }
        expression
    }
}

impl Condition for FullTextCondition {
    fn append_to(&self, sql: &mut String, selector: &dyn SelectorNameProvider) {
        if self.is_empty() {
            return;
        }
        if self.negate {
            sql.push_str("NOT ");
        }
        sql.push_str("CONTAINS(");
        match self.property.as_deref() {
            Some(name) => append_property(sql, selector, name.trim()),
            None => {
                if let Some(selector) = selector.selector_name() {
                    sql.push_str(selector);
                    sql.push('.');
                }
                sql.push('*');
            }
        }
        sql.push_str(", ");
        sql.push_str(&quote(&self.expression()));
        sql.push(')');
    }

    fn is_empty(&self) -> bool {
        self.property.as_deref().is_some_and(is_blank) || self.terms.iter().all(Term::is_blank)
    }
}

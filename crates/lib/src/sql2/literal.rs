//! Literal rendering and escaping.

use crate::value::{Value, iso8601};

/// Wraps `value` in single quotes, doubling embedded quotes.
///
/// ```
/// # use node_decorators::sql2::literal::quote;
/// assert_eq!(quote("it's"), "'it''s'");
/// ```
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Escapes the LIKE wildcards `%` and `_` and the escape character `\`.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Appends `value` as an SQL2 literal.
///
/// Strings are quoted and longs are written as digits; every other type is
/// written as a cast from its string form, e.g. `CAST('1.5' AS DOUBLE)`.
pub fn append_literal(sql: &mut String, value: &Value) {
    match value {
        Value::String(text) => sql.push_str(&quote(text)),
        Value::Long(n) => sql.push_str(&n.to_string()),
        Value::Double(d) => append_cast(sql, &format!("{d:?}"), "DOUBLE"),
        Value::Decimal(d) => append_cast(sql, &d.to_string(), "DECIMAL"),
        Value::Boolean(b) => append_cast(sql, &b.to_string(), "BOOLEAN"),
        Value::Date(date) => append_cast(sql, &iso8601::format(date), "DATE"),
        Value::Reference(id) => append_cast(sql, id, "REFERENCE"),
        Value::Binary(bytes) => append_cast(sql, &String::from_utf8_lossy(bytes), "BINARY"),
    }
}

fn append_cast(sql: &mut String, text: &str, type_name: &str) {
    sql.push_str("CAST(");
    sql.push_str(&quote(text));
    sql.push_str(" AS ");
    sql.push_str(type_name);
    sql.push(')');
}

/// Renders `value` as an SQL2 literal.
pub fn literal(value: &Value) -> String {
    let mut sql = String::new();
    append_literal(&mut sql, value);
    sql
}

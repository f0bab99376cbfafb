//! Typed property values.
//!
//! [`Value`] is the repository's single-value representation: one variant per
//! [`PropertyType`], with conversions between types following content-repository
//! value semantics (numbers parse from strings, dates convert to epoch
//! milliseconds, booleans read `"true"` case-insensitively, and so on).
//! Conversions that make no sense fail with a value-format error.
//!
//! [`Values`] is what a property holds: an ordered list of values of one type
//! plus a flag telling single-valued and multi-valued properties apart.

pub mod iso8601;

use std::{fmt, str::FromStr};

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use serde::{Deserialize, Serialize};

use crate::{Result, node::RepositoryError};

/// The type tag of a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    String,
    Binary,
    Long,
    Double,
    Date,
    Boolean,
    Decimal,
    Reference,
}

impl PropertyType {
    /// Returns the repository name of this type.
    pub fn name(&self) -> &'static str {
        match self {
            PropertyType::String => "String",
            PropertyType::Binary => "Binary",
            PropertyType::Long => "Long",
            PropertyType::Double => "Double",
            PropertyType::Date => "Date",
            PropertyType::Boolean => "Boolean",
            PropertyType::Decimal => "Decimal",
            PropertyType::Reference => "Reference",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single typed property value.
///
/// # Conversions
///
/// ```
/// # use node_decorators::Value;
/// let long = Value::from(42);
/// assert_eq!(long.get_string().unwrap(), "42");
/// assert_eq!(long.get_double().unwrap(), 42.0);
///
/// let text = Value::from("17");
/// assert_eq!(text.get_long().unwrap(), 17);
/// assert!(Value::from("seventeen").get_long().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    String(String),
    Binary(Vec<u8>),
    Long(i64),
    Double(f64),
    Date(DateTime<FixedOffset>),
    Boolean(bool),
    Decimal(Decimal),
    /// Identifier of the referenced node
    Reference(String),
}

impl Value {
    /// Returns the type tag of this value.
    pub fn property_type(&self) -> PropertyType {
        match self {
            Value::String(_) => PropertyType::String,
            Value::Binary(_) => PropertyType::Binary,
            Value::Long(_) => PropertyType::Long,
            Value::Double(_) => PropertyType::Double,
            Value::Date(_) => PropertyType::Date,
            Value::Boolean(_) => PropertyType::Boolean,
            Value::Decimal(_) => PropertyType::Decimal,
            Value::Reference(_) => PropertyType::Reference,
        }
    }

    fn mismatch(&self, target: PropertyType) -> crate::Error {
        RepositoryError::value_format(
            target.name(),
            format!("{} values do not convert", self.property_type()),
        )
        .into()
    }

    fn unparsable(&self, target: PropertyType, text: &str) -> crate::Error {
        RepositoryError::value_format(target.name(), format!("'{text}' is not a valid value"))
            .into()
    }

    /// Returns the string form of this value.
    pub fn get_string(&self) -> Result<String> {
        match self {
            Value::String(s) | Value::Reference(s) => Ok(s.clone()),
            Value::Binary(bytes) => String::from_utf8(bytes.clone()).map_err(|e| {
                RepositoryError::value_format(PropertyType::String.name(), e.to_string()).into()
            }),
            Value::Long(n) => Ok(n.to_string()),
            Value::Double(d) => Ok(format!("{d:?}")),
            Value::Date(date) => Ok(iso8601::format(date)),
            Value::Boolean(b) => Ok(b.to_string()),
            Value::Decimal(d) => Ok(d.to_string()),
        }
    }

    /// Returns this value as a 64-bit integer.
    ///
    /// Doubles and decimals truncate toward zero; dates convert to epoch milliseconds.
    pub fn get_long(&self) -> Result<i64> {
        match self {
            Value::Long(n) => Ok(*n),
            Value::Double(d) => Ok(d.trunc() as i64),
            Value::Date(date) => Ok(date.timestamp_millis()),
            Value::Decimal(d) => d
                .trunc()
                .to_i64()
                .ok_or_else(|| self.unparsable(PropertyType::Long, &d.to_string())),
            Value::String(_) | Value::Binary(_) => {
                let text = self.get_string()?;
                text.parse::<i64>()
                    .map_err(|_| self.unparsable(PropertyType::Long, &text))
            }
            Value::Boolean(_) | Value::Reference(_) => Err(self.mismatch(PropertyType::Long)),
        }
    }

    /// Returns this value as a double.
    pub fn get_double(&self) -> Result<f64> {
        match self {
            Value::Double(d) => Ok(*d),
            Value::Long(n) => Ok(*n as f64),
            Value::Date(date) => Ok(date.timestamp_millis() as f64),
            Value::Decimal(d) => d
                .to_f64()
                .ok_or_else(|| self.unparsable(PropertyType::Double, &d.to_string())),
            Value::String(_) | Value::Binary(_) => {
                let text = self.get_string()?;
                text.parse::<f64>()
                    .map_err(|_| self.unparsable(PropertyType::Double, &text))
            }
            Value::Boolean(_) | Value::Reference(_) => Err(self.mismatch(PropertyType::Double)),
        }
    }

    /// Returns this value as an arbitrary-precision decimal.
    pub fn get_decimal(&self) -> Result<Decimal> {
        match self {
            Value::Decimal(d) => Ok(*d),
            Value::Long(n) => Ok(Decimal::from(*n)),
            Value::Double(d) => Decimal::from_f64(*d)
                .ok_or_else(|| self.unparsable(PropertyType::Decimal, &d.to_string())),
            Value::Date(date) => Ok(Decimal::from(date.timestamp_millis())),
            Value::String(_) | Value::Binary(_) => {
                let text = self.get_string()?;
                Decimal::from_str(&text).map_err(|_| self.unparsable(PropertyType::Decimal, &text))
            }
            Value::Boolean(_) | Value::Reference(_) => Err(self.mismatch(PropertyType::Decimal)),
        }
    }

    /// Returns this value as a boolean.
    ///
    /// Strings convert to `true` only when they equal `"true"`, ignoring case.
    pub fn get_boolean(&self) -> Result<bool> {
        match self {
            Value::Boolean(b) => Ok(*b),
            Value::String(_) | Value::Binary(_) => {
                Ok(self.get_string()?.eq_ignore_ascii_case("true"))
            }
            _ => Err(self.mismatch(PropertyType::Boolean)),
        }
    }

    /// Returns this value as a calendar date.
    ///
    /// Numbers are read as epoch milliseconds in UTC; strings must be ISO8601.
    pub fn get_date(&self) -> Result<DateTime<FixedOffset>> {
        let from_millis = |millis: i64| {
            Utc.timestamp_millis_opt(millis)
                .single()
                .map(|date| date.fixed_offset())
                .ok_or_else(|| self.unparsable(PropertyType::Date, &millis.to_string()))
        };
        match self {
            Value::Date(date) => Ok(*date),
            Value::Long(n) => from_millis(*n),
            Value::Double(_) | Value::Decimal(_) => from_millis(self.get_long()?),
            Value::String(_) | Value::Binary(_) => {
                let text = self.get_string()?;
                iso8601::parse(&text).ok_or_else(|| self.unparsable(PropertyType::Date, &text))
            }
            Value::Boolean(_) | Value::Reference(_) => Err(self.mismatch(PropertyType::Date)),
        }
    }

    /// Returns the binary form of this value: raw bytes, or the UTF-8 string form.
    pub fn get_binary(&self) -> Result<Vec<u8>> {
        match self {
            Value::Binary(bytes) => Ok(bytes.clone()),
            _ => Ok(self.get_string()?.into_bytes()),
        }
    }

    /// Returns the length of this value: byte size for binaries, character count
    /// of the string form otherwise.
    pub fn length(&self) -> Result<usize> {
        match self {
            Value::Binary(bytes) => Ok(bytes.len()),
            _ => Ok(self.get_string()?.chars().count()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get_string() {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "<{} bytes>", self.length().unwrap_or_default()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Long(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::Decimal(value)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Value::Date(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Date(value.fixed_offset())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Binary(value)
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::String(s) if s == other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Value::Long(n) if n == other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, Value::Boolean(b) if b == other)
    }
}

/// The values held by a property.
///
/// Single values convert from the scalar types; arrays and vectors convert to
/// multi-valued lists:
///
/// ```
/// # use node_decorators::Values;
/// let single = Values::from("title");
/// assert!(!single.is_multiple());
///
/// let tags = Values::from(["news", "sports"]);
/// assert!(tags.is_multiple());
/// assert_eq!(tags.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Values {
    values: Vec<Value>,
    multiple: bool,
}

impl Values {
    /// Creates a single-valued list.
    pub fn single(value: impl Into<Value>) -> Self {
        Self {
            values: vec![value.into()],
            multiple: false,
        }
    }

    /// Creates a multi-valued list. The list may be empty.
    pub fn multiple<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            multiple: true,
        }
    }

    /// Returns true if these values belong to a multi-valued property.
    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    /// Returns the first value, if any.
    pub fn first(&self) -> Option<&Value> {
        self.values.first()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.values
    }

    /// Returns the type of the first value, if any.
    pub fn property_type(&self) -> Option<PropertyType> {
        self.first().map(Value::property_type)
    }

    /// Returns true if all values share one type.
    pub fn is_homogeneous(&self) -> bool {
        match self.property_type() {
            Some(first) => self.iter().all(|v| v.property_type() == first),
            None => true,
        }
    }
}

macro_rules! single_values_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Values {
                fn from(value: $ty) -> Self {
                    Values::single(value)
                }
            }
        )*
    };
}

single_values_from!(
    Value,
    &str,
    String,
    i64,
    i32,
    f64,
    bool,
    Decimal,
    DateTime<FixedOffset>,
    DateTime<Utc>,
);

impl<V: Into<Value>> From<Vec<V>> for Values {
    fn from(values: Vec<V>) -> Self {
        Values::multiple(values)
    }
}

impl<V: Into<Value>, const N: usize> From<[V; N]> for Values {
    fn from(values: [V; N]) -> Self {
        Values::multiple(values)
    }
}

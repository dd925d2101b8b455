//! Raw column values as handed over by the surrounding table storage.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::canonical::CanonicalValue;

/// A single untyped element of a column.
///
/// Columns are heterogeneous: nothing stops a numeric column from holding
/// a stray string. The coercion step decides which of these are acceptable
/// for a given validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RawValue {
    /// An explicit missing marker.
    Null,
    Bool(bool),
    Int(i64),
    /// Floating-point number. NaN is treated as missing.
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    /// Calendar date without a time component.
    Date(NaiveDate),
    /// Wall-clock date and time with no zone. Not an instant.
    DateTime(NaiveDateTime),
    /// A precise instant.
    Timestamp(DateTime<Utc>),
}

impl RawValue {
    /// Check if this value is a missing marker (`Null` or a NaN float).
    pub fn is_missing(&self) -> bool {
        match self {
            RawValue::Null => true,
            RawValue::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Short name of the value's shape, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Bool(_) => "bool",
            RawValue::Int(_) => "int",
            RawValue::Float(_) => "float",
            RawValue::Str(_) => "str",
            RawValue::Bytes(_) => "bytes",
            RawValue::Date(_) => "date",
            RawValue::DateTime(_) => "datetime",
            RawValue::Timestamp(_) => "timestamp",
        }
    }
}

impl From<bool> for RawValue {
    fn from(v: bool) -> Self {
        RawValue::Bool(v)
    }
}

impl From<i32> for RawValue {
    fn from(v: i32) -> Self {
        RawValue::Int(i64::from(v))
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Int(v)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Float(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Str(v.to_string())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::Str(v)
    }
}

impl From<Vec<u8>> for RawValue {
    fn from(v: Vec<u8>) -> Self {
        RawValue::Bytes(v)
    }
}

impl From<NaiveDate> for RawValue {
    fn from(v: NaiveDate) -> Self {
        RawValue::Date(v)
    }
}

impl From<NaiveDateTime> for RawValue {
    fn from(v: NaiveDateTime) -> Self {
        RawValue::DateTime(v)
    }
}

impl From<DateTime<Utc>> for RawValue {
    fn from(v: DateTime<Utc>) -> Self {
        RawValue::Timestamp(v)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(RawValue::Null, Into::into)
    }
}

impl From<CanonicalValue> for RawValue {
    fn from(v: CanonicalValue) -> Self {
        match v {
            CanonicalValue::Missing => RawValue::Null,
            CanonicalValue::Date(d) => RawValue::Date(d),
            CanonicalValue::Timestamp(ts) => RawValue::Timestamp(ts),
            CanonicalValue::Number(n) => RawValue::Float(n),
            CanonicalValue::Text(s) => RawValue::Str(s),
        }
    }
}

/// A named, ordered sequence of raw values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Display name used in reports.
    pub name: Option<String>,
    /// Values in row order.
    pub values: Vec<RawValue>,
}

impl Column {
    /// Create a named column from anything convertible to raw values.
    pub fn new<T: Into<RawValue>>(name: impl Into<String>, values: impl IntoIterator<Item = T>) -> Self {
        Self {
            name: Some(name.into()),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a column without a display name.
    pub fn unnamed<T: Into<RawValue>>(values: impl IntoIterator<Item = T>) -> Self {
        Self {
            name: None,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Rebuild a column from canonical values, e.g. the payload of a
    /// `values` validation.
    pub fn from_canonical(name: Option<String>, values: &[CanonicalValue]) -> Self {
        Self {
            name,
            values: values.iter().cloned().map(RawValue::from).collect(),
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Get the number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the values in row order.
    pub fn iter(&self) -> impl Iterator<Item = &RawValue> {
        self.values.iter()
    }

    /// Count missing values.
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }
}

impl FromIterator<RawValue> for Column {
    fn from_iter<I: IntoIterator<Item = RawValue>>(iter: I) -> Self {
        Self {
            name: None,
            values: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Column {
    type Item = &'a RawValue;
    type IntoIter = std::slice::Iter<'a, RawValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

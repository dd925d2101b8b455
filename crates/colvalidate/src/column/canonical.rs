//! Canonical (coerced) value types.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Target type a validator coerces a column into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Date,
    Timestamp,
    Number,
    Text,
}

impl ValueKind {
    /// Get a human-readable label for the kind.
    pub fn label(&self) -> &'static str {
        match self {
            ValueKind::Date => "date",
            ValueKind::Timestamp => "timestamp",
            ValueKind::Number => "numeric",
            ValueKind::Text => "string",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A typed value produced by coercion, positionally aligned with its column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CanonicalValue {
    Missing,
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    Number(f64),
    Text(String),
}

impl CanonicalValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CanonicalValue::Missing)
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CanonicalValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            CanonicalValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CanonicalValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CanonicalValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Hashable identity used for duplicate detection.
    ///
    /// Numbers compare by numeric value (`1` and `1.0` collide, as do
    /// `0.0` and `-0.0`); dates, timestamps and strings compare exactly.
    /// Missing values have no key.
    pub fn key(&self) -> Option<ValueKey<'_>> {
        match self {
            CanonicalValue::Missing => None,
            CanonicalValue::Date(d) => Some(ValueKey::Date(*d)),
            CanonicalValue::Timestamp(ts) => Some(ValueKey::Timestamp(*ts)),
            CanonicalValue::Number(n) => {
                let normalized = if *n == 0.0 { 0.0 } else { *n };
                Some(ValueKey::Number(normalized.to_bits()))
            }
            CanonicalValue::Text(s) => Some(ValueKey::Text(s)),
        }
    }
}

impl fmt::Display for CanonicalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalValue::Missing => f.write_str("<missing>"),
            CanonicalValue::Date(d) => write!(f, "{d}"),
            CanonicalValue::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
            CanonicalValue::Number(n) => write!(f, "{n}"),
            CanonicalValue::Text(s) => f.write_str(s),
        }
    }
}

/// Equality key for a non-missing canonical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKey<'a> {
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    Number(u64),
    Text(&'a str),
}

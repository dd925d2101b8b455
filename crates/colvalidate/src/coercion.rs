//! Strict type coercion of raw columns.
//!
//! Coercion is a type check, not a parser: a string holding `"42"` is not a
//! number. Every raw element maps to exactly one canonical value; elements
//! of the wrong type become [`CanonicalValue::Missing`] and are recorded in
//! the mismatch mask.

use crate::column::{CanonicalValue, Column, RawValue, ValueKind};

/// Result of coercing a column to a single value kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Coerced {
    /// Canonical values, aligned 1:1 with the input.
    pub values: Vec<CanonicalValue>,
    /// `true` where the raw value was present but of the wrong type.
    pub mismatch: Vec<bool>,
}

impl Coerced {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of present values with the wrong type.
    pub fn mismatch_count(&self) -> usize {
        self.mismatch.iter().filter(|m| **m).count()
    }
}

/// Coerce every value of `column` to `kind`.
pub fn coerce(column: &Column, kind: ValueKind) -> Coerced {
    let mut values = Vec::with_capacity(column.len());
    let mut mismatch = Vec::with_capacity(column.len());

    for raw in column {
        if raw.is_missing() {
            values.push(CanonicalValue::Missing);
            mismatch.push(false);
            continue;
        }

        match coerce_value(raw, kind) {
            Some(value) => {
                values.push(value);
                mismatch.push(false);
            }
            None => {
                values.push(CanonicalValue::Missing);
                mismatch.push(true);
            }
        }
    }

    Coerced { values, mismatch }
}

/// Accept a single present value, or `None` if it has the wrong type.
fn coerce_value(raw: &RawValue, kind: ValueKind) -> Option<CanonicalValue> {
    match (kind, raw) {
        (ValueKind::Date, RawValue::Date(d)) => Some(CanonicalValue::Date(*d)),
        (ValueKind::Timestamp, RawValue::Timestamp(ts)) => Some(CanonicalValue::Timestamp(*ts)),
        // i64 -> f64 may round beyond 2^53; numeric comparisons happen in f64
        (ValueKind::Number, RawValue::Int(i)) => Some(CanonicalValue::Number(*i as f64)),
        (ValueKind::Number, RawValue::Float(f)) => Some(CanonicalValue::Number(*f)),
        (ValueKind::Text, RawValue::Str(s)) => Some(CanonicalValue::Text(s.clone())),
        _ => None,
    }
}

//! Rendering of mixed columns as text.

use std::fmt::{Display, Write};

use chrono::format::{Item, StrftimeItems};

use crate::error::{Result, ValidationError};

use super::value::{Column, RawValue};

/// Convert every present value of a column to a string.
///
/// Numbers use their shortest round-trip form (`1.0` renders as `1`),
/// dates and date-times use `datetime_format` (a chrono format string such
/// as `%Y-%m-%d`), and byte strings are decoded lossily. Missing values
/// stay missing.
///
/// Fails with [`ValidationError::InvalidFormat`] if `datetime_format` holds
/// an unknown specifier, or one the value cannot supply (e.g. `%H` for a
/// plain date).
pub fn to_text(column: &Column, datetime_format: &str) -> Result<Column> {
    check_format(datetime_format)?;

    let values = column
        .iter()
        .map(|value| {
            if value.is_missing() {
                return Ok(RawValue::Null);
            }
            let text = match value {
                RawValue::Null => return Ok(RawValue::Null),
                RawValue::Str(s) => s.clone(),
                RawValue::Bool(b) => b.to_string(),
                RawValue::Int(i) => i.to_string(),
                RawValue::Float(f) => f.to_string(),
                RawValue::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
                RawValue::Date(d) => render(d.format(datetime_format), datetime_format)?,
                RawValue::DateTime(dt) => render(dt.format(datetime_format), datetime_format)?,
                RawValue::Timestamp(ts) => render(ts.format(datetime_format), datetime_format)?,
            };
            Ok(RawValue::Str(text))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Column {
        name: column.name.clone(),
        values,
    })
}

/// Reject format strings with unknown specifiers before touching data.
fn check_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ValidationError::InvalidFormat(format.to_string()));
    }
    Ok(())
}

fn render(formatted: impl Display, format: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{formatted}").map_err(|_| ValidationError::InvalidFormat(format.to_string()))?;
    Ok(out)
}

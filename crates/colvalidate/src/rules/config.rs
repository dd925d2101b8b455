//! Rule sets for the four column validators.
//!
//! Each rule set is plain data with permissive defaults: a default rule set
//! gates no checks besides the type check. Rule sets deserialize from JSON
//! with every field optional.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::column::ValueKind;
use crate::error::{Result, ValidationError};

use super::types::{Case, ReturnType};

/// Rules for columns of calendar dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRules {
    /// Allow missing values.
    pub nullable: bool,
    /// Flag repeated values.
    pub unique: bool,
    /// Earliest allowed date, inclusive.
    pub min_date: Option<NaiveDate>,
    /// Latest allowed date, inclusive.
    pub max_date: Option<NaiveDate>,
    pub return_type: ReturnType,
}

impl Default for DateRules {
    fn default() -> Self {
        Self {
            nullable: true,
            unique: false,
            min_date: None,
            max_date: None,
            return_type: ReturnType::None,
        }
    }
}

impl DateRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    pub fn with_min_date(mut self, min: NaiveDate) -> Self {
        self.min_date = Some(min);
        self
    }

    pub fn with_max_date(mut self, max: NaiveDate) -> Self {
        self.max_date = Some(max);
        self
    }

    pub fn with_return_type(mut self, return_type: ReturnType) -> Self {
        self.return_type = return_type;
        self
    }
}

/// Rules for columns of UTC instants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimestampRules {
    pub nullable: bool,
    pub unique: bool,
    /// Earliest allowed instant, inclusive.
    pub min_timestamp: Option<DateTime<Utc>>,
    /// Latest allowed instant, inclusive.
    pub max_timestamp: Option<DateTime<Utc>>,
    pub return_type: ReturnType,
}

impl Default for TimestampRules {
    fn default() -> Self {
        Self {
            nullable: true,
            unique: false,
            min_timestamp: None,
            max_timestamp: None,
            return_type: ReturnType::None,
        }
    }
}

impl TimestampRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    pub fn with_min_timestamp(mut self, min: DateTime<Utc>) -> Self {
        self.min_timestamp = Some(min);
        self
    }

    pub fn with_max_timestamp(mut self, max: DateTime<Utc>) -> Self {
        self.max_timestamp = Some(max);
        self
    }

    pub fn with_return_type(mut self, return_type: ReturnType) -> Self {
        self.return_type = return_type;
        self
    }
}

/// Rules for numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericRules {
    pub nullable: bool,
    pub unique: bool,
    /// Require whole numbers.
    pub integer: bool,
    /// Minimum value, inclusive.
    pub min_value: Option<f64>,
    /// Maximum value, inclusive.
    pub max_value: Option<f64>,
    pub return_type: ReturnType,
}

impl Default for NumericRules {
    fn default() -> Self {
        Self {
            nullable: true,
            unique: false,
            integer: false,
            min_value: None,
            max_value: None,
            return_type: ReturnType::None,
        }
    }
}

impl NumericRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    pub fn with_integer(mut self, integer: bool) -> Self {
        self.integer = integer;
        self
    }

    pub fn with_min_value(mut self, min: f64) -> Self {
        self.min_value = Some(min);
        self
    }

    pub fn with_max_value(mut self, max: f64) -> Self {
        self.max_value = Some(max);
        self
    }

    pub fn with_return_type(mut self, return_type: ReturnType) -> Self {
        self.return_type = return_type;
        self
    }
}

/// Rules for string columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringRules {
    pub nullable: bool,
    pub unique: bool,
    /// Minimum length in characters, inclusive.
    pub min_length: Option<usize>,
    /// Maximum length in characters, inclusive.
    pub max_length: Option<usize>,
    pub case: Case,
    /// Allow newline characters.
    pub newlines: bool,
    /// Allow leading or trailing whitespace.
    pub trailing_whitespace: bool,
    /// Allow any whitespace.
    pub whitespace: bool,
    /// Regular expression every value must contain a match for.
    pub pattern: Option<String>,
    /// Regular expression no value may contain a match for.
    pub forbidden_pattern: Option<String>,
    /// Allowed values.
    pub whitelist: Option<Vec<String>>,
    /// Forbidden values.
    pub blacklist: Option<Vec<String>>,
    pub return_type: ReturnType,
}

impl Default for StringRules {
    fn default() -> Self {
        Self {
            nullable: true,
            unique: false,
            min_length: None,
            max_length: None,
            case: Case::None,
            newlines: true,
            trailing_whitespace: true,
            whitespace: true,
            pattern: None,
            forbidden_pattern: None,
            whitelist: None,
            blacklist: None,
            return_type: ReturnType::None,
        }
    }
}

impl StringRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn with_case(mut self, case: Case) -> Self {
        self.case = case;
        self
    }

    pub fn with_newlines(mut self, allowed: bool) -> Self {
        self.newlines = allowed;
        self
    }

    pub fn with_trailing_whitespace(mut self, allowed: bool) -> Self {
        self.trailing_whitespace = allowed;
        self
    }

    pub fn with_whitespace(mut self, allowed: bool) -> Self {
        self.whitespace = allowed;
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_forbidden_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.forbidden_pattern = Some(pattern.into());
        self
    }

    pub fn with_whitelist<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.whitelist = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_blacklist<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.blacklist = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_return_type(mut self, return_type: ReturnType) -> Self {
        self.return_type = return_type;
        self
    }
}

/// Any of the four rule sets, tagged by target type.
///
/// ```
/// use colvalidate::ColumnRules;
///
/// let rules = ColumnRules::from_json(
///     r#"{"type": "numeric", "nullable": false, "min_value": 0}"#,
/// ).unwrap();
/// assert_eq!(rules.kind(), colvalidate::ValueKind::Number);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnRules {
    Date(DateRules),
    Timestamp(TimestampRules),
    Numeric(NumericRules),
    String(StringRules),
}

impl ColumnRules {
    /// Parse rules from a JSON document.
    ///
    /// Unknown `case` or `return_type` text fails with
    /// [`ValidationError::UnknownCase`] or [`ValidationError::UnknownReturnType`].
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        check_option::<ReturnType>(&value, "return_type")?;
        if value.get("type").and_then(serde_json::Value::as_str) == Some("string") {
            check_option::<Case>(&value, "case")?;
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Serialize rules to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Value kind the rules coerce into.
    pub fn kind(&self) -> ValueKind {
        match self {
            ColumnRules::Date(_) => ValueKind::Date,
            ColumnRules::Timestamp(_) => ValueKind::Timestamp,
            ColumnRules::Numeric(_) => ValueKind::Number,
            ColumnRules::String(_) => ValueKind::Text,
        }
    }
}

/// Parse a text option through `FromStr` so its typed error survives.
fn check_option<T>(value: &serde_json::Value, key: &str) -> Result<()>
where
    T: FromStr<Err = ValidationError>,
{
    if let Some(text) = value.get(key).and_then(serde_json::Value::as_str) {
        text.parse::<T>()?;
    }
    Ok(())
}

impl From<DateRules> for ColumnRules {
    fn from(rules: DateRules) -> Self {
        ColumnRules::Date(rules)
    }
}

impl From<TimestampRules> for ColumnRules {
    fn from(rules: TimestampRules) -> Self {
        ColumnRules::Timestamp(rules)
    }
}

impl From<NumericRules> for ColumnRules {
    fn from(rules: NumericRules) -> Self {
        ColumnRules::Numeric(rules)
    }
}

impl From<StringRules> for ColumnRules {
    fn from(rules: StringRules) -> Self {
        ColumnRules::String(rules)
    }
}

//! colvalidate: rule-based validation of single tabular columns.
//!
//! A column is a named sequence of loosely typed values. Each validator
//! coerces the column to one type (date, timestamp, number or string), runs
//! the checks its rules enable, and returns a human-readable report together
//! with a payload shaped as the caller asked.
//!
//! # Core Principles
//!
//! - **Strict coercion**: values of the wrong type are flagged, never parsed
//! - **Data is not an error**: only bad configuration returns `Err`
//! - **Stable output**: report clauses always appear in one canonical order
//!
//! # Example
//!
//! ```
//! use colvalidate::{validate_string, Column, ReturnType, StringRules};
//!
//! let column = Column::new("TestSeries", vec!["aaa", "bb", "c"]);
//! let rules = StringRules::new()
//!     .with_min_length(1)
//!     .with_max_length(2)
//!     .with_return_type(ReturnType::MaskSeries);
//!
//! let outcome = validate_string(&column, &rules).unwrap();
//! assert_eq!(
//!     outcome.report.as_deref(),
//!     Some("[RangeWarning]: 'TestSeries': string(s) too long.")
//! );
//! assert_eq!(outcome.payload.failure_mask().unwrap(), &[true, false, false]);
//! ```

pub mod coercion;
pub mod column;
pub mod error;
pub mod rules;
pub mod validation;

pub use column::{CanonicalValue, Column, RawValue, ValueKind};
pub use error::{Result, ValidationError};
pub use rules::{Case, ColumnRules, DateRules, NumericRules, ReturnType, StringRules, TimestampRules};
pub use validation::{
    CheckId, MaskTable, Payload, ValidationOutcome, Validator, validate, validate_date,
    validate_numeric, validate_string, validate_timestamp,
};
